use strum::IntoEnumIterator;

const WEEK: i64 = 60 * 60 * 24 * 7;

/// Premium profile bounding what a host may create. Ordered from least to
/// most generous so the better of two tiers is simply the `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
pub enum PremiumTier {
    Free,
    Boost,
    Patron,
    Donator,
    Discord,
    Super,
}

impl PremiumTier {
    pub fn level(self) -> i32 {
        match self {
            PremiumTier::Free => 0,
            PremiumTier::Boost => 1,
            PremiumTier::Patron => 2,
            PremiumTier::Donator => 3,
            PremiumTier::Discord => 4,
            PremiumTier::Super => 5,
        }
    }

    /// Unknown levels fall back to [`PremiumTier::Free`].
    pub fn from_level(level: i32) -> Self {
        PremiumTier::iter()
            .find(|tier| tier.level() == level)
            .unwrap_or(PremiumTier::Free)
    }

    pub fn name(self) -> &'static str {
        match self {
            PremiumTier::Free => "None",
            PremiumTier::Boost => "Nitro Booster",
            PremiumTier::Patron => "Patron",
            PremiumTier::Donator => "Donator",
            PremiumTier::Discord => "Discord",
            PremiumTier::Super => "Super Patron",
        }
    }

    /// Longest allowed giveaway, in seconds.
    pub fn max_duration(self) -> i64 {
        match self {
            PremiumTier::Free => 2 * WEEK,
            PremiumTier::Boost | PremiumTier::Patron | PremiumTier::Donator => 5 * WEEK,
            PremiumTier::Discord | PremiumTier::Super => 6 * WEEK,
        }
    }

    pub fn max_winners(self) -> i32 {
        match self {
            PremiumTier::Free => 20,
            PremiumTier::Boost | PremiumTier::Patron | PremiumTier::Donator => 30,
            PremiumTier::Discord | PremiumTier::Super => 50,
        }
    }

    pub fn max_giveaways(self) -> i64 {
        match self {
            PremiumTier::Free => 20,
            _ => 25,
        }
    }

    /// Whether [`PremiumTier::max_giveaways`] is counted per channel rather
    /// than across the whole guild.
    pub fn per_channel_limit(self) -> bool {
        self != PremiumTier::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_round_trip_and_unknown_levels_are_free() {
        for tier in PremiumTier::iter() {
            assert_eq!(PremiumTier::from_level(tier.level()), tier);
        }
        assert_eq!(PremiumTier::from_level(42), PremiumTier::Free);
        assert_eq!(PremiumTier::from_level(-1), PremiumTier::Free);
    }

    #[test]
    fn better_tier_wins_max() {
        assert_eq!(
            PremiumTier::Boost.max(PremiumTier::Super),
            PremiumTier::Super
        );
        assert!(PremiumTier::Free < PremiumTier::Boost);
    }

    #[test]
    fn only_free_tier_counts_per_guild() {
        assert!(!PremiumTier::Free.per_channel_limit());
        assert!(PremiumTier::iter()
            .filter(|tier| *tier != PremiumTier::Free)
            .all(PremiumTier::per_channel_limit));
    }
}
