use thiserror::Error;
use time::OffsetDateTime;

use crate::{
    common::duration::Duration,
    models::{giveaway::GiveawayDraft, tier::PremiumTier},
};

pub const MINIMUM_SECONDS: i64 = 10;
pub const MAX_PRIZE_LENGTH: usize = 250;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

fn readable(seconds: &i64) -> humantime::FormattedDuration {
    humantime::format_duration(std::time::Duration::from_secs(
        u64::try_from(*seconds).unwrap_or(0),
    ))
}

/// Bad user input. Returned to the host as-is, never logged as a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{0}` is not a valid duration, try something like `10m` or `1h30m`")]
    InvalidDuration(String),
    #[error("{} is too short, giveaways must last at least {}", readable(.seconds), readable(.minimum))]
    DurationTooShort { seconds: i64, minimum: i64 },
    #[error("{} is too long, giveaways can last at most {}", readable(.seconds), readable(.maximum))]
    DurationTooLong { seconds: i64, maximum: i64 },
    #[error("`{0}` is not a valid number of winners")]
    InvalidWinners(String),
    #[error("{winners} winners is not allowed, pick between 1 and {maximum}")]
    WinnersOutOfRange { winners: i64, maximum: i32 },
    #[error("the prize is {length} characters long, the limit is {maximum}")]
    PrizeTooLong { length: usize, maximum: usize },
    #[error("the description is {length} characters long, the limit is {maximum}")]
    DescriptionTooLong { length: usize, maximum: usize },
}

/// Checks raw host input against the tier's limits, in a fixed order, and
/// builds the draft that will be announced. The first failing check wins.
pub fn validate_and_construct(
    host_id: i64,
    duration: &str,
    winners: &str,
    prize: &str,
    description: Option<&str>,
    tier: PremiumTier,
    now: OffsetDateTime,
) -> Result<GiveawayDraft, ValidationError> {
    let seconds = Duration::parse(duration)
        .and_then(|parsed| parsed.total_seconds())
        .filter(|seconds| *seconds > 0)
        .ok_or_else(|| ValidationError::InvalidDuration(duration.to_string()))?;
    if seconds < MINIMUM_SECONDS {
        return Err(ValidationError::DurationTooShort {
            seconds,
            minimum: MINIMUM_SECONDS,
        });
    }
    if seconds > tier.max_duration() {
        return Err(ValidationError::DurationTooLong {
            seconds,
            maximum: tier.max_duration(),
        });
    }

    let winner_count = winners
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidWinners(winners.to_string()))?;
    if winner_count < 1 || winner_count > i64::from(tier.max_winners()) {
        return Err(ValidationError::WinnersOutOfRange {
            winners: winner_count,
            maximum: tier.max_winners(),
        });
    }

    let prize_length = prize.chars().count();
    if prize_length > MAX_PRIZE_LENGTH {
        return Err(ValidationError::PrizeTooLong {
            length: prize_length,
            maximum: MAX_PRIZE_LENGTH,
        });
    }
    if let Some(description) = description {
        let description_length = description.chars().count();
        if description_length > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong {
                length: description_length,
                maximum: MAX_DESCRIPTION_LENGTH,
            });
        }
    }

    Ok(GiveawayDraft {
        host_id,
        end_time: now + time::Duration::seconds(seconds),
        // Bounded by the tier maximum above.
        winners: winner_count as i32,
        prize: prize.to_string(),
        description: description
            .filter(|description| !description.is_empty())
            .map(ToString::to_string),
    })
}
