use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashSet},
    sync::Arc,
    time::Duration,
};

use time::OffsetDateTime;
use tokio::{
    sync::{mpsc, watch, Semaphore},
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, error, info};

use super::manager::{EndReport, GiveawayManager};
use crate::{database::StoreResult, models::giveaway::Giveaway};

/// Giveaways ending within this window are treated as due.
pub const SWEEP_LOOKAHEAD: Duration = Duration::from_millis(500);

pub type ScheduleSender = mpsc::UnboundedSender<Giveaway>;
pub type ScheduleReceiver = mpsc::UnboundedReceiver<Giveaway>;

pub fn schedule_channel() -> (ScheduleSender, ScheduleReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub sweep_interval: Duration,
    pub resync_interval: Duration,
    pub workers: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            sweep_interval: Duration::from_secs(1),
            resync_interval: Duration::from_secs(60),
            workers: 16,
        }
    }
}

struct Pending(Giveaway);

impl Pending {
    fn key(&self) -> (OffsetDateTime, i64) {
        (self.0.end_time(), self.0.message_id)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

enum Wake {
    Shutdown,
    Scheduled(Option<Giveaway>),
    Timer,
}

/// Ends giveaways when they run out of time.
///
/// Upcoming expirations sit in a min-heap fed by the manager as giveaways are
/// created, and topped up from the store on every resync so that records
/// written elsewhere are not missed. Due giveaways are ended on spawned tasks
/// bounded by a semaphore; the loop itself never waits on an ending. Two
/// schedulers may see the same giveaway, the store's claim decides which of
/// them ends it.
pub struct Scheduler {
    manager: Arc<GiveawayManager>,
    config: SchedulerConfig,
    pending: BinaryHeap<Reverse<Pending>>,
    queued: HashSet<i64>,
    workers: Arc<Semaphore>,
    incoming: Option<ScheduleReceiver>,
}

pub struct SchedulerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops sweeping. Endings already dispatched run to completion.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(err) = self.task.await {
            error!("Giveaway scheduler did not shut down cleanly. Failed with error: {err:?}");
        }
    }
}

async fn next_scheduled(incoming: &mut Option<ScheduleReceiver>) -> Option<Giveaway> {
    match incoming {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

impl Scheduler {
    pub fn new(
        manager: Arc<GiveawayManager>,
        incoming: ScheduleReceiver,
        config: SchedulerConfig,
    ) -> Self {
        Scheduler {
            manager,
            workers: Arc::new(Semaphore::new(config.workers.max(1))),
            config,
            pending: BinaryHeap::new(),
            queued: HashSet::new(),
            incoming: Some(incoming),
        }
    }

    pub fn start(self) -> SchedulerHandle {
        let (stop, shutdown) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown));
        SchedulerHandle { stop, task }
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule(&mut self, giveaway: Giveaway) {
        if self.queued.insert(giveaway.message_id) {
            self.pending.push(Reverse(Pending(giveaway)));
        }
    }

    /// Queues every stored giveaway ending before the next resync is due.
    pub async fn resync(&mut self, now: OffsetDateTime) -> StoreResult<usize> {
        let horizon = now + self.config.resync_interval + SWEEP_LOOKAHEAD;
        let found = self.manager.store().giveaways_ending_by(horizon).await?;
        let count = found.len();
        for giveaway in found {
            self.schedule(giveaway);
        }
        debug!("Resynced {count} giveaways ending by {horizon}");
        Ok(count)
    }

    /// Hands every giveaway due at `now` to the worker pool.
    pub fn dispatch_due(&mut self, now: OffsetDateTime) -> Vec<JoinHandle<Option<EndReport>>> {
        let due_by = now + SWEEP_LOOKAHEAD;
        let mut dispatched = vec![];
        while self
            .pending
            .peek()
            .is_some_and(|Reverse(next)| next.0.end_time() <= due_by)
        {
            let Some(Reverse(Pending(giveaway))) = self.pending.pop() else {
                break;
            };
            self.queued.remove(&giveaway.message_id);
            dispatched.push(self.dispatch(giveaway));
        }
        if !dispatched.is_empty() {
            debug!("Dispatched {} due giveaways", dispatched.len());
        }
        dispatched
    }

    fn dispatch(&self, giveaway: Giveaway) -> JoinHandle<Option<EndReport>> {
        let manager = self.manager.clone();
        let workers = self.workers.clone();
        tokio::spawn(async move {
            let Ok(_permit) = workers.acquire_owned().await else {
                return None;
            };
            match manager.end_giveaway(&giveaway).await {
                Ok(report) => report,
                Err(err) => {
                    error!(
                        "Could not end giveaway {}. Failed with error: {err:?}",
                        giveaway.message_id
                    );
                    None
                }
            }
        })
    }

    /// One full pass: drains new notifications, resyncs from the store and
    /// dispatches whatever is due.
    #[cfg(test)]
    pub async fn sweep(
        &mut self,
        now: OffsetDateTime,
    ) -> StoreResult<Vec<JoinHandle<Option<EndReport>>>> {
        while let Some(giveaway) = self
            .incoming
            .as_mut()
            .and_then(|receiver| receiver.try_recv().ok())
        {
            self.schedule(giveaway);
        }
        self.resync(now).await?;
        Ok(self.dispatch_due(now))
    }

    fn next_wake(&self, now: OffsetDateTime, next_resync: Instant) -> Instant {
        let mut wake = (Instant::now() + self.config.sweep_interval).min(next_resync);
        if let Some(Reverse(next)) = self.pending.peek() {
            let until_due = Duration::try_from(next.0.end_time() - now)
                .unwrap_or(Duration::ZERO)
                .saturating_sub(SWEEP_LOOKAHEAD);
            wake = wake.min(Instant::now() + until_due);
        }
        wake
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Giveaway scheduler started with {} workers",
            self.config.workers
        );
        let mut next_resync = Instant::now();

        loop {
            if Instant::now() >= next_resync {
                if let Err(err) = self.resync(OffsetDateTime::now_utc()).await {
                    error!("Could not resync giveaways. Failed with error: {err:?}");
                }
                self.manager.cooldowns().evict_expired();
                next_resync = Instant::now() + self.config.resync_interval;
            }

            // Endings report through their own logging.
            drop(self.dispatch_due(OffsetDateTime::now_utc()));

            let wake_at = self.next_wake(OffsetDateTime::now_utc(), next_resync);
            let wake = tokio::select! {
                _ = shutdown.changed() => Wake::Shutdown,
                scheduled = next_scheduled(&mut self.incoming) => Wake::Scheduled(scheduled),
                () = tokio::time::sleep_until(wake_at) => Wake::Timer,
            };

            match wake {
                Wake::Shutdown => break,
                Wake::Scheduled(Some(giveaway)) => self.schedule(giveaway),
                Wake::Scheduled(None) => {
                    debug!("Schedule channel closed, relying on resyncs");
                    self.incoming = None;
                }
                Wake::Timer => {}
            }
        }

        info!("Giveaway scheduler stopped");
    }
}
