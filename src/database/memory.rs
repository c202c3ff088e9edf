use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use time::OffsetDateTime;

use super::{EntryOutcome, GiveawayStore, StoreResult};
use crate::models::{giveaway::Giveaway, settings::GuildSettings, user::CachedUser};

#[derive(Default)]
struct State {
    giveaways: HashMap<i64, Giveaway>,
    entries: HashMap<i64, HashSet<i64>>,
    settings: HashMap<i64, GuildSettings>,
    premium: HashMap<i64, i32>,
    users: HashMap<i64, CachedUser>,
}

/// Store double backed by one mutex, which makes every operation (claims
/// included) atomic. The lock is never held across an await.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing_claims: Mutex<HashSet<i64>>,
    claims_while_counting: Mutex<HashSet<i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn set_premium_level(&self, user_id: i64, level: i32) {
        self.state.lock().unwrap().premium.insert(user_id, level);
    }

    /// Makes claims of `id` fail with a store error.
    pub fn fail_claims_for(&self, id: i64) {
        self.failing_claims.lock().unwrap().insert(id);
    }

    /// Removes `id` the next time its entries are counted, as if another
    /// worker claimed it mid-render.
    pub fn claim_while_counting(&self, id: i64) {
        self.claims_while_counting.lock().unwrap().insert(id);
    }

    pub fn contains(&self, id: i64) -> bool {
        self.state.lock().unwrap().giveaways.contains_key(&id)
    }

    pub fn has_entry_set(&self, id: i64) -> bool {
        self.state.lock().unwrap().entries.contains_key(&id)
    }
}

#[async_trait::async_trait]
impl GiveawayStore for MemoryStore {
    async fn giveaway(&self, id: i64) -> StoreResult<Option<Giveaway>> {
        Ok(self.state.lock().unwrap().giveaways.get(&id).cloned())
    }

    async fn create_giveaway(&self, giveaway: &Giveaway) -> StoreResult<()> {
        self.state
            .lock()
            .unwrap()
            .giveaways
            .insert(giveaway.message_id, giveaway.clone());
        Ok(())
    }

    async fn claim_giveaway(&self, id: i64) -> StoreResult<Option<Vec<i64>>> {
        if self.failing_claims.lock().unwrap().contains(&id) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        let mut state = self.state.lock().unwrap();
        if state.giveaways.remove(&id).is_none() {
            return Ok(None);
        }
        let entries = state.entries.remove(&id).unwrap_or_default();
        Ok(Some(entries.into_iter().collect()))
    }

    async fn giveaways_ending_by(
        &self,
        instant: OffsetDateTime,
    ) -> StoreResult<Vec<Giveaway>> {
        let state = self.state.lock().unwrap();
        let mut due = state
            .giveaways
            .values()
            .filter(|giveaway| giveaway.end_time() <= instant)
            .cloned()
            .collect::<Vec<_>>();
        due.sort_by_key(Giveaway::end_time);
        Ok(due)
    }

    async fn giveaways_by_channel(&self, channel_id: i64) -> StoreResult<Vec<Giveaway>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .giveaways
            .values()
            .filter(|giveaway| giveaway.channel_id == channel_id)
            .cloned()
            .collect())
    }

    async fn giveaways_by_guild(&self, guild_id: i64) -> StoreResult<Vec<Giveaway>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .giveaways
            .values()
            .filter(|giveaway| giveaway.guild_id == guild_id)
            .cloned()
            .collect())
    }

    async fn count_by_channel(&self, channel_id: i64) -> StoreResult<i64> {
        Ok(self.giveaways_by_channel(channel_id).await?.len() as i64)
    }

    async fn count_by_guild(&self, guild_id: i64) -> StoreResult<i64> {
        Ok(self.giveaways_by_guild(guild_id).await?.len() as i64)
    }

    async fn add_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<EntryOutcome> {
        let mut state = self.state.lock().unwrap();
        if !state.giveaways.contains_key(&giveaway_id) {
            return Ok(EntryOutcome::GiveawayMissing);
        }
        let entries = state.entries.entry(giveaway_id).or_default();
        if !entries.insert(user_id) {
            return Ok(EntryOutcome::AlreadyEntered);
        }
        Ok(EntryOutcome::Entered(entries.len() as i64))
    }

    async fn remove_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .entries
            .get_mut(&giveaway_id)
            .is_some_and(|entries| entries.remove(&user_id)))
    }

    async fn entries(&self, giveaway_id: i64) -> StoreResult<Vec<i64>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entries
            .get(&giveaway_id)
            .map(|entries| entries.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn entry_count(&self, giveaway_id: i64) -> StoreResult<i64> {
        let mut state = self.state.lock().unwrap();
        let count = state
            .entries
            .get(&giveaway_id)
            .map_or(0, |entries| entries.len() as i64);
        if self.claims_while_counting.lock().unwrap().remove(&giveaway_id) {
            state.giveaways.remove(&giveaway_id);
            state.entries.remove(&giveaway_id);
        }
        Ok(count)
    }

    async fn settings(&self, guild_id: i64) -> StoreResult<GuildSettings> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .settings
            .get(&guild_id)
            .cloned()
            .unwrap_or_else(|| GuildSettings::new(guild_id)))
    }

    async fn save_settings(&self, settings: &GuildSettings) -> StoreResult<()> {
        self.state
            .lock()
            .unwrap()
            .settings
            .insert(settings.guild_id, settings.clone());
        Ok(())
    }

    async fn premium_level(&self, user_id: i64) -> StoreResult<i32> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .premium
            .get(&user_id)
            .copied()
            .unwrap_or(0))
    }

    async fn cache_user(&self, user: &CachedUser) -> StoreResult<()> {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user.user_id, user.clone());
        Ok(())
    }

    async fn cached_users(&self, user_ids: &[i64]) -> StoreResult<Vec<CachedUser>> {
        let state = self.state.lock().unwrap();
        Ok(user_ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}
