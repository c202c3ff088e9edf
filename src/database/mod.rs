use thiserror::Error;
use time::OffsetDateTime;

use crate::models::{giveaway::Giveaway, settings::GuildSettings, user::CachedUser};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The user was added; carries the new entry count.
    Entered(i64),
    AlreadyEntered,
    /// The giveaway was ended or deleted before the entry landed.
    GiveawayMissing,
}

/// Persistence for giveaways, their entrants and guild settings.
///
/// Implementations own records by message id. [`GiveawayStore::claim_giveaway`]
/// is the only way a giveaway leaves the store and must succeed at most once
/// per id, no matter how many callers race on it.
#[async_trait::async_trait]
pub trait GiveawayStore: Send + Sync {
    async fn giveaway(&self, id: i64) -> StoreResult<Option<Giveaway>>;

    async fn create_giveaway(&self, giveaway: &Giveaway) -> StoreResult<()>;

    /// Atomically removes the giveaway together with its entries and returns
    /// the entrants it had. `None` means someone else already claimed it (or
    /// it never existed).
    async fn claim_giveaway(&self, id: i64) -> StoreResult<Option<Vec<i64>>>;

    async fn giveaways_ending_by(&self, instant: OffsetDateTime)
        -> StoreResult<Vec<Giveaway>>;

    async fn giveaways_by_channel(&self, channel_id: i64) -> StoreResult<Vec<Giveaway>>;

    async fn giveaways_by_guild(&self, guild_id: i64) -> StoreResult<Vec<Giveaway>>;

    async fn count_by_channel(&self, channel_id: i64) -> StoreResult<i64>;

    async fn count_by_guild(&self, guild_id: i64) -> StoreResult<i64>;

    async fn add_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<EntryOutcome>;

    async fn remove_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<bool>;

    async fn entries(&self, giveaway_id: i64) -> StoreResult<Vec<i64>>;

    async fn entry_count(&self, giveaway_id: i64) -> StoreResult<i64>;

    /// Settings for the guild, or the defaults when none were saved.
    async fn settings(&self, guild_id: i64) -> StoreResult<GuildSettings>;

    async fn save_settings(&self, settings: &GuildSettings) -> StoreResult<()>;

    /// Raw premium level of a user; 0 when unknown.
    async fn premium_level(&self, user_id: i64) -> StoreResult<i32>;

    async fn cache_user(&self, user: &CachedUser) -> StoreResult<()>;

    /// Profiles of whichever of `user_ids` were seen before; unknown ids are
    /// left out.
    async fn cached_users(&self, user_ids: &[i64]) -> StoreResult<Vec<CachedUser>>;
}
