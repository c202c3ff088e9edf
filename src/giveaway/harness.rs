use std::sync::Arc;

use time::OffsetDateTime;

use super::{
    manager::GiveawayManager,
    scheduler::{schedule_channel, ScheduleReceiver},
};
use crate::{
    database::{memory::MemoryStore, GiveawayStore},
    messaging::fake::{FakeMessenger, FakeUploader},
    models::giveaway::{Giveaway, GiveawayDraft},
};

pub const GUILD_ID: i64 = 3;

/// A manager wired to in-memory doubles, all of which stay inspectable.
pub struct Harness {
    pub manager: Arc<GiveawayManager>,
    pub store: Arc<MemoryStore>,
    pub messenger: Arc<FakeMessenger>,
    pub uploader: Arc<FakeUploader>,
    pub schedule: ScheduleReceiver,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let messenger = Arc::new(FakeMessenger::new());
        let uploader = Arc::new(FakeUploader::new());
        let (sender, schedule) = schedule_channel();

        Harness {
            manager: Arc::new(GiveawayManager::new(
                store.clone(),
                messenger.clone(),
                uploader.clone(),
                sender,
            )),
            store,
            messenger,
            uploader,
            schedule,
        }
    }

    pub fn draft(&self, ends_in: time::Duration) -> GiveawayDraft {
        GiveawayDraft {
            host_id: 7,
            end_time: OffsetDateTime::now_utc() + ends_in,
            winners: 1,
            prize: "Nitro".to_string(),
            description: None,
        }
    }

    /// Stores a giveaway directly, as if another process had created it.
    pub async fn insert(&self, id: i64, channel_id: i64, ends_in: time::Duration) -> Giveaway {
        let giveaway = self.draft(ends_in).into_giveaway(id, channel_id, GUILD_ID);
        self.store.create_giveaway(&giveaway).await.unwrap();
        giveaway
    }
}
