use std::sync::Arc;

use tracing::debug;

use crate::database::{EntryOutcome, GiveawayStore, StoreResult};

/// Entrant bookkeeping for running giveaways. Atomicity comes from the store:
/// an add is a single conditional insert, never a read followed by a write.
#[derive(Clone)]
pub struct EntryTracker {
    store: Arc<dyn GiveawayStore>,
}

impl EntryTracker {
    pub fn new(store: Arc<dyn GiveawayStore>) -> Self {
        EntryTracker { store }
    }

    pub async fn add_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<EntryOutcome> {
        let outcome = self.store.add_entry(giveaway_id, user_id).await?;
        debug!("Entry of user {user_id} into giveaway {giveaway_id}: {outcome:?}");
        Ok(outcome)
    }

    pub async fn remove_entry(&self, giveaway_id: i64, user_id: i64) -> StoreResult<bool> {
        let removed = self.store.remove_entry(giveaway_id, user_id).await?;
        debug!("Removal of user {user_id} from giveaway {giveaway_id}: {removed}");
        Ok(removed)
    }

    pub async fn entry_count(&self, giveaway_id: i64) -> StoreResult<i64> {
        self.store.entry_count(giveaway_id).await
    }

    pub async fn entrants(&self, giveaway_id: i64) -> StoreResult<Vec<i64>> {
        self.store.entries(giveaway_id).await
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::{database::memory::MemoryStore, models::giveaway::GiveawayDraft};

    async fn tracker_with_giveaway(id: i64) -> (EntryTracker, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let giveaway = GiveawayDraft {
            host_id: 1,
            end_time: OffsetDateTime::now_utc() + time::Duration::hours(1),
            winners: 1,
            prize: "Prize".to_string(),
            description: None,
        }
        .into_giveaway(id, 2, 3);
        store.create_giveaway(&giveaway).await.unwrap();
        (EntryTracker::new(store.clone()), store)
    }

    #[tokio::test]
    async fn second_entry_by_same_user_is_rejected() {
        let (tracker, _) = tracker_with_giveaway(10).await;

        assert_eq!(
            tracker.add_entry(10, 99).await.unwrap(),
            EntryOutcome::Entered(1)
        );
        assert_eq!(
            tracker.add_entry(10, 99).await.unwrap(),
            EntryOutcome::AlreadyEntered
        );
        assert_eq!(tracker.entry_count(10).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn remove_reports_whether_user_was_entered() {
        let (tracker, _) = tracker_with_giveaway(10).await;
        tracker.add_entry(10, 99).await.unwrap();

        assert!(tracker.remove_entry(10, 99).await.unwrap());
        assert!(!tracker.remove_entry(10, 99).await.unwrap());
        assert!(!tracker.remove_entry(11, 99).await.unwrap());
        assert_eq!(tracker.entry_count(10).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn entries_into_missing_giveaways_are_refused() {
        let (tracker, _) = tracker_with_giveaway(10).await;

        assert_eq!(
            tracker.add_entry(11, 99).await.unwrap(),
            EntryOutcome::GiveawayMissing
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_entries_are_never_lost() {
        let (tracker, _) = tracker_with_giveaway(10).await;

        let tasks = (0..200)
            .map(|user_id| {
                let tracker = tracker.clone();
                // Every user presses twice at the same time.
                tokio::spawn(async move {
                    let (first, second) = tokio::join!(
                        tracker.add_entry(10, user_id % 100),
                        tracker.add_entry(10, user_id % 100)
                    );
                    (first.unwrap(), second.unwrap())
                })
            })
            .collect::<Vec<_>>();

        let mut entered = 0;
        for task in tasks {
            let (first, second) = task.await.unwrap();
            for outcome in [first, second] {
                if matches!(outcome, EntryOutcome::Entered(_)) {
                    entered += 1;
                }
            }
        }

        assert_eq!(entered, 100);
        assert_eq!(tracker.entry_count(10).await.unwrap(), 100);
        let mut entrants = tracker.entrants(10).await.unwrap();
        entrants.sort_unstable();
        assert_eq!(entrants, (0..100).collect::<Vec<_>>());
    }
}
