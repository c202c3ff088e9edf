use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref FILLER_REGEX: Regex = Regex::new(r"(\s|,|and)").unwrap();
    static ref DURATION_REGEX: Regex = Regex::new(r"(\d+)([a-z]+)").unwrap();
}

/// A duration written by a user, like `1h30m` or `2 days, 4 hours and 10s`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Duration {
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Duration {
    /// Units are matched by their first letter (`w`, `d`, `h`, `m`, `s`) and
    /// repeated units add up. Returns `None` unless the whole input is made of
    /// number/unit pairs.
    pub fn parse(string: &str) -> Option<Duration> {
        debug!("Parsing duration: {}", string);
        let lowered = string.to_lowercase();
        let compact = FILLER_REGEX.replace_all(&lowered, "");
        if compact.is_empty() {
            return None;
        }

        let mut duration = Duration::default();
        let mut consumed = 0;
        for capture in DURATION_REGEX.captures_iter(&compact) {
            let whole = capture.get(0)?;
            if whole.start() != consumed {
                return None;
            }
            consumed = whole.end();

            let value = capture.get(1)?.as_str().parse::<i64>().ok()?;
            let field = match capture.get(2)?.as_str().chars().next()? {
                'w' => &mut duration.weeks,
                'd' => &mut duration.days,
                'h' => &mut duration.hours,
                'm' => &mut duration.minutes,
                's' => &mut duration.seconds,
                _ => return None,
            };
            *field = field.checked_add(value)?;
        }
        if consumed != compact.len() {
            return None;
        }

        debug!("Parsed duration: {:?}", duration);
        Some(duration)
    }

    pub fn total_seconds(&self) -> Option<i64> {
        self.seconds
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.hours.checked_mul(60 * 60)?)?
            .checked_add(self.days.checked_mul(60 * 60 * 24)?)?
            .checked_add(self.weeks.checked_mul(60 * 60 * 24 * 7)?)
    }
}
