use sqlx::PgPool;
use time::OffsetDateTime;

use super::{EntryOutcome, GiveawayStore, StoreResult};
use crate::models::{giveaway::Giveaway, settings::GuildSettings, user::CachedUser};

pub mod entries;
pub mod giveaway;
pub mod guild;
pub mod user;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl GiveawayStore for PgStore {
    async fn giveaway(&self, id: i64) -> StoreResult<Option<Giveaway>> {
        giveaway::get_giveaway(&self.pool, id).await
    }

    async fn create_giveaway(&self, giveaway: &Giveaway) -> StoreResult<()> {
        giveaway::insert_giveaway(&self.pool, giveaway).await
    }

    async fn claim_giveaway(&self, id: i64) -> StoreResult<Option<Vec<i64>>> {
        giveaway::claim_giveaway(&self.pool, id).await
    }

    async fn giveaways_ending_by(
        &self,
        instant: OffsetDateTime,
    ) -> StoreResult<Vec<Giveaway>> {
        giveaway::get_giveaways_ending_by(&self.pool, instant).await
    }

    async fn giveaways_by_channel(&self, channel_id: i64) -> StoreResult<Vec<Giveaway>> {
        giveaway::get_giveaways_by_channel(&self.pool, channel_id).await
    }

    async fn giveaways_by_guild(&self, guild_id: i64) -> StoreResult<Vec<Giveaway>> {
        giveaway::get_giveaways_by_guild(&self.pool, guild_id).await
    }

    async fn count_by_channel(&self, channel_id: i64) -> StoreResult<i64> {
        giveaway::count_giveaways_by_channel(&self.pool, channel_id).await
    }

    async fn count_by_guild(&self, guild_id: i64) -> StoreResult<i64> {
        giveaway::count_giveaways_by_guild(&self.pool, guild_id).await
    }

    async fn add_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<EntryOutcome> {
        entries::insert_entry(&self.pool, giveaway_id, user_id).await
    }

    async fn remove_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<bool> {
        entries::delete_entry(&self.pool, giveaway_id, user_id).await
    }

    async fn entries(&self, giveaway_id: i64) -> StoreResult<Vec<i64>> {
        entries::get_entries(&self.pool, giveaway_id).await
    }

    async fn entry_count(&self, giveaway_id: i64) -> StoreResult<i64> {
        entries::count_entries(&self.pool, giveaway_id).await
    }

    async fn settings(&self, guild_id: i64) -> StoreResult<GuildSettings> {
        Ok(guild::get_guild_settings(&self.pool, guild_id)
            .await?
            .unwrap_or_else(|| GuildSettings::new(guild_id)))
    }

    async fn save_settings(&self, settings: &GuildSettings) -> StoreResult<()> {
        guild::upsert_guild_settings(&self.pool, settings).await
    }

    async fn premium_level(&self, user_id: i64) -> StoreResult<i32> {
        guild::get_premium_level(&self.pool, user_id).await
    }

    async fn cache_user(&self, user: &CachedUser) -> StoreResult<()> {
        user::upsert_user(&self.pool, user).await
    }

    async fn cached_users(&self, user_ids: &[i64]) -> StoreResult<Vec<CachedUser>> {
        user::get_users(&self.pool, user_ids).await
    }
}

// These run against a real database: `DATABASE_URL=... cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::models::giveaway::GiveawayDraft;

    fn giveaway(id: i64, end_time: OffsetDateTime) -> Giveaway {
        GiveawayDraft {
            host_id: 7,
            end_time,
            winners: 1,
            prize: "Nitro".to_string(),
            description: None,
        }
        .into_giveaway(id, 2, 3)
    }

    #[sqlx::test]
    #[ignore]
    async fn concurrent_claims_are_granted_once(pool: PgPool) {
        let store = PgStore::new(pool);
        store
            .create_giveaway(&giveaway(1, datetime!(2024-06-01 12:00 UTC)))
            .await
            .unwrap();
        for user in [11, 12, 13] {
            store.add_entry(1, user).await.unwrap();
        }

        let (first, second) = tokio::join!(store.claim_giveaway(1), store.claim_giveaway(1));
        let mut granted = [first.unwrap(), second.unwrap()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        assert_eq!(granted.len(), 1);
        granted[0].sort_unstable();
        assert_eq!(granted[0], vec![11, 12, 13]);
        assert_eq!(store.giveaway(1).await.unwrap(), None);
        assert_eq!(store.entry_count(1).await.unwrap(), 0);
    }

    #[sqlx::test]
    #[ignore]
    async fn entries_report_duplicates_and_missing_giveaways(pool: PgPool) {
        let store = PgStore::new(pool);
        store
            .create_giveaway(&giveaway(1, datetime!(2024-06-01 12:00 UTC)))
            .await
            .unwrap();

        assert_eq!(store.add_entry(1, 11).await.unwrap(), EntryOutcome::Entered(1));
        assert_eq!(store.add_entry(1, 11).await.unwrap(), EntryOutcome::AlreadyEntered);
        assert_eq!(store.add_entry(1, 12).await.unwrap(), EntryOutcome::Entered(2));
        assert_eq!(store.add_entry(2, 11).await.unwrap(), EntryOutcome::GiveawayMissing);

        assert!(store.remove_entry(1, 11).await.unwrap());
        assert!(!store.remove_entry(1, 11).await.unwrap());
        assert_eq!(store.entries(1).await.unwrap(), vec![12]);
    }

    #[sqlx::test]
    #[ignore]
    async fn due_query_includes_its_bound(pool: PgPool) {
        let store = PgStore::new(pool);
        let bound = datetime!(2024-06-01 12:00 UTC);
        store.create_giveaway(&giveaway(1, bound)).await.unwrap();
        store
            .create_giveaway(&giveaway(2, bound + time::Duration::seconds(1)))
            .await
            .unwrap();

        let due = store.giveaways_ending_by(bound).await.unwrap();
        assert_eq!(
            due.iter().map(|giveaway| giveaway.message_id).collect::<Vec<_>>(),
            vec![1]
        );
        assert_eq!(store.count_by_channel(2).await.unwrap(), 2);
        assert_eq!(store.count_by_guild(4).await.unwrap(), 0);
    }

    #[sqlx::test]
    #[ignore]
    async fn settings_and_profiles_are_upserted(pool: PgPool) {
        let store = PgStore::new(pool);
        assert_eq!(store.settings(3).await.unwrap(), GuildSettings::new(3));

        let mut settings = GuildSettings::new(3);
        settings.color = 0xFF0000;
        settings.log_channel = Some(77);
        store.save_settings(&settings).await.unwrap();
        settings.emoji = Some("🎁".to_string());
        store.save_settings(&settings).await.unwrap();
        assert_eq!(store.settings(3).await.unwrap(), settings);

        let mut user = CachedUser {
            user_id: 11,
            username: "before".to_string(),
            discriminator: None,
            avatar: None,
        };
        store.cache_user(&user).await.unwrap();
        user.username = "after".to_string();
        store.cache_user(&user).await.unwrap();
        assert_eq!(store.cached_users(&[11, 12]).await.unwrap(), vec![user]);
    }
}
