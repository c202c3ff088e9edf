use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

pub const FAILURE_COOLDOWN: Duration = Duration::from_secs(30);

/// Remembers when each guild last failed to create a giveaway so a broken
/// channel is not hammered with retries.
pub struct CooldownTracker {
    failures: DashMap<i64, Instant>,
    window: Duration,
}

impl Default for CooldownTracker {
    fn default() -> Self {
        CooldownTracker::new(FAILURE_COOLDOWN)
    }
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        CooldownTracker {
            failures: DashMap::new(),
            window,
        }
    }

    pub fn record_failure(&self, guild_id: i64) {
        self.record_failure_at(guild_id, Instant::now());
    }

    pub fn record_failure_at(&self, guild_id: i64, at: Instant) {
        self.failures.insert(guild_id, at);
    }

    pub fn is_on_cooldown(&self, guild_id: i64) -> bool {
        self.is_on_cooldown_at(guild_id, Instant::now())
    }

    pub fn is_on_cooldown_at(&self, guild_id: i64, now: Instant) -> bool {
        self.failures
            .get(&guild_id)
            .is_some_and(|failed_at| now.saturating_duration_since(*failed_at) < self.window)
    }

    /// Drops failures older than the window; returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let before = self.failures.len();
        self.failures
            .retain(|_, failed_at| now.saturating_duration_since(*failed_at) < self.window);
        let evicted = before.saturating_sub(self.failures.len());
        if evicted > 0 {
            debug!("Evicted {evicted} expired creation cooldowns");
        }
        evicted
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.failures.len()
    }
}
