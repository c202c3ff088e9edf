use serenity::all::ReactionType;
use sqlx::FromRow;

pub const DEFAULT_COLOR: i32 = 0x5865F2;
pub const DEFAULT_EMOJI: &str = "🎉";
const MAX_EMOJI_LENGTH: usize = 64;

const NAMED_COLORS: [(&str, i32); 14] = [
    ("black", 0x000000),
    ("blue", 0x0000FF),
    ("blurple", DEFAULT_COLOR),
    ("cyan", 0x00FFFF),
    ("dark_gray", 0x404040),
    ("gray", 0x808080),
    ("green", 0x00FF00),
    ("light_gray", 0xC0C0C0),
    ("magenta", 0xFF00FF),
    ("orange", 0xFFC800),
    ("pink", 0xFFAFAF),
    ("red", 0xFF0000),
    ("white", 0xFFFFFF),
    ("yellow", 0xFFFF00),
];

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GuildSettings {
    pub guild_id: i64,
    pub color: i32,
    pub emoji: Option<String>,
    pub log_channel: Option<i64>,
    pub locale: Option<String>,
    pub owner_id: Option<i64>,
}

impl GuildSettings {
    pub fn new(guild_id: i64) -> Self {
        GuildSettings {
            guild_id,
            color: DEFAULT_COLOR,
            emoji: None,
            log_channel: None,
            locale: None,
            owner_id: None,
        }
    }

    pub fn color(&self) -> u32 {
        u32::try_from(self.color).unwrap_or(DEFAULT_COLOR as u32)
    }

    pub fn color_hex(&self) -> String {
        format!("#{:06X}", self.color() & 0xFF_FFFF)
    }

    pub fn emoji(&self) -> &str {
        self.emoji.as_deref().unwrap_or(DEFAULT_EMOJI)
    }
}

/// Accepts `#RRGGBB`, `0xRRGGBB`, bare `RRGGBB` or a colour name such as
/// `red` or `light gray`.
pub fn parse_color(input: &str) -> Option<i32> {
    let input = input.trim().to_lowercase();
    let name = input.replace([' ', '-'], "_");
    if let Some((_, color)) = NAMED_COLORS.iter().find(|(known, _)| *known == name) {
        return Some(*color);
    }

    let hex = input
        .strip_prefix('#')
        .or_else(|| input.strip_prefix("0x"))
        .unwrap_or(&input);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    i32::from_str_radix(hex, 16).ok()
}

/// A single unicode emoji or a custom emoji mention (`<:name:id>`).
pub fn parse_emoji(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty()
        || input.len() > MAX_EMOJI_LENGTH
        || input.chars().any(char::is_whitespace)
        || input.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    ReactionType::try_from(input).ok()?;
    Some(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#FF8800"), Some(0xFF8800));
        assert_eq!(parse_color("0x00ff00"), Some(0x00FF00));
        assert_eq!(parse_color("abcdef"), Some(0xABCDEF));
        assert_eq!(parse_color("Red"), Some(0xFF0000));
        assert_eq!(parse_color("light gray"), Some(0xC0C0C0));
        assert_eq!(parse_color(" blurple "), Some(DEFAULT_COLOR));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
        assert_eq!(parse_color("+12345"), None);
        assert_eq!(parse_color("#1234567"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn hex_form_round_trips_through_parse() {
        let mut settings = GuildSettings::new(1);
        settings.color = 0x0A0B0C;
        assert_eq!(settings.color_hex(), "#0A0B0C");
        assert_eq!(parse_color(&settings.color_hex()), Some(0x0A0B0C));
    }

    #[test]
    fn accepts_unicode_and_custom_emoji() {
        assert_eq!(parse_emoji("🎁"), Some("🎁".to_string()));
        assert_eq!(
            parse_emoji(" <:tada:123456789012345678> "),
            Some("<:tada:123456789012345678>".to_string())
        );
    }

    #[test]
    fn rejects_text_that_is_not_an_emoji() {
        assert_eq!(parse_emoji(""), None);
        assert_eq!(parse_emoji("tada"), None);
        assert_eq!(parse_emoji("🎁 🎉"), None);
        assert_eq!(parse_emoji("<:tada:notanid>"), None);
    }
}
