//! ItemQueueService - pending items, processed counter and the two drains
//!
//! All mutating operations return nothing; their effects are observed through
//! `pending_count`, `total_processed`, `pending_items`, the item callbacks and
//! the drain lifecycle events.

use crate::core::sync::lock_or_recover;
use crate::notifications::event::{DrainEvent, DrainEventType, DrainMode};
use crate::notifications::manager::{DrainNotifier, EventReceiver};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::handler::ItemHandler;
use crate::queue::scheduler::{DrainScheduler, TokioScheduler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// State shared between the service handle and scheduled drain jobs
struct QueueState {
    pending: Mutex<Vec<String>>,
    processed_total: AtomicU64,
    /// Held for the whole item loop of a drain so no two drains interleave
    drain_guard: Mutex<()>,
    next_drain_id: AtomicU64,
    notifier: DrainNotifier,
}

impl QueueState {
    fn next_drain_id(&self) -> u64 {
        self.next_drain_id.fetch_add(1, Ordering::SeqCst)
    }
}

/// One drain's item loop, from its `Started` event to its terminal event
///
/// Dropped without `finish` (a callback unwound), it publishes `Failed` so
/// anyone waiting on the drain still sees it end.
struct DrainRun<'a> {
    state: &'a QueueState,
    mode: DrainMode,
    drain_id: u64,
    handled: usize,
    finished: bool,
}

impl<'a> DrainRun<'a> {
    fn start(state: &'a QueueState, mode: DrainMode, drain_id: u64, items: usize) -> Self {
        state.notifier.publish(DrainEvent::new(
            DrainEventType::Started,
            mode,
            drain_id,
            items,
        ));
        Self {
            state,
            mode,
            drain_id,
            handled: 0,
            finished: false,
        }
    }

    /// Hand each snapshot item to the callback, counting as it goes
    fn process<H>(&mut self, snapshot: &[String], on_item: &mut H)
    where
        H: ItemHandler + ?Sized,
    {
        for item in snapshot {
            on_item.handle(item);
            self.state.processed_total.fetch_add(1, Ordering::SeqCst);
            self.handled += 1;
        }
    }

    /// Publish `Completed`; call only once the pending queue is updated
    fn finish(mut self) {
        log::debug!(
            "{} drain {} processed {} items",
            self.mode,
            self.drain_id,
            self.handled
        );
        self.finished = true;
    }
}

impl Drop for DrainRun<'_> {
    fn drop(&mut self) {
        let event_type = if self.finished {
            DrainEventType::Completed
        } else {
            log::warn!(
                "{} drain {} stopped after {} items: callback panicked",
                self.mode,
                self.drain_id,
                self.handled
            );
            DrainEventType::Failed
        };
        self.state.notifier.publish(DrainEvent::new(
            event_type,
            self.mode,
            self.drain_id,
            self.handled,
        ));
    }
}

/// Remove the drained items from `pending`, keeping anything added since
///
/// Usually the snapshot is still the queue's prefix; otherwise the first
/// remaining occurrence of each drained item is removed.
fn remove_drained(pending: &mut Vec<String>, snapshot: &[String]) {
    if pending.starts_with(snapshot) {
        pending.drain(..snapshot.len());
        return;
    }
    for item in snapshot {
        if let Some(index) = pending.iter().position(|queued| queued == item) {
            pending.remove(index);
        }
    }
}

/// In-memory queue of pending string items with synchronous and deferred drains
///
/// Cloning is cheap and clones share the same queue. The service expects a
/// single logical owner; it is thread-safe, but see `drain_async` for the
/// one accepted race.
///
/// # Example
///
/// ```rust
/// use drainq::queue::api::{ItemQueueService, ManualScheduler};
/// use std::sync::Arc;
///
/// let service = ItemQueueService::new(Arc::new(ManualScheduler::new()));
/// service.add("a");
/// service.add("b");
///
/// let mut seen = Vec::new();
/// service.drain_sync(&mut |item: &str| seen.push(item.to_string()));
///
/// assert_eq!(seen, vec!["a", "b"]);
/// assert_eq!(service.pending_count(), 0);
/// assert_eq!(service.total_processed(), 2);
/// ```
#[derive(Clone)]
pub struct ItemQueueService {
    state: Arc<QueueState>,
    scheduler: Arc<dyn DrainScheduler>,
}

impl ItemQueueService {
    pub fn new(scheduler: Arc<dyn DrainScheduler>) -> Self {
        Self {
            state: Arc::new(QueueState {
                pending: Mutex::new(Vec::new()),
                processed_total: AtomicU64::new(0),
                drain_guard: Mutex::new(()),
                next_drain_id: AtomicU64::new(1),
                notifier: DrainNotifier::new(),
            }),
            scheduler,
        }
    }

    /// Create a service whose deferred drains run on the current tokio runtime
    pub fn on_current_runtime() -> QueueResult<Self> {
        Ok(Self::new(Arc::new(TokioScheduler::current()?)))
    }

    /// Append an item to the end of the pending queue
    pub fn add(&self, item: impl Into<String>) {
        let item = item.into();
        log::trace!("Adding item '{}'", item);
        lock_or_recover(&self.state.pending, "pending").push(item);
    }

    /// Remove the first pending occurrence of `item`
    ///
    /// Fails with `QueueError::NotFound` when the item is not pending, leaving
    /// the queue untouched.
    pub fn remove(&self, item: &str) -> QueueResult<()> {
        let mut pending = lock_or_recover(&self.state.pending, "pending");
        match pending.iter().position(|queued| queued == item) {
            Some(index) => {
                pending.remove(index);
                log::trace!("Removed item '{}' at position {}", item, index);
                Ok(())
            }
            None => {
                log::debug!("Cannot remove '{}': not pending", item);
                Err(QueueError::NotFound {
                    item: item.to_string(),
                })
            }
        }
    }

    /// Drop every pending item. The processed counter is not affected.
    pub fn clear(&self) {
        let mut pending = lock_or_recover(&self.state.pending, "pending");
        log::debug!("Clearing {} pending items", pending.len());
        pending.clear();
    }

    /// Drain the pending queue now, on the calling thread
    ///
    /// Waits for any drain already mid-loop, then copies the pending queue and
    /// hands each item to `on_item`. The drained items leave the queue only
    /// after the last callback returns: callbacks still see them pending, and
    /// anything a callback adds stays queued for a later drain. If a callback
    /// panics the queue is left as it was. The callback must not start another
    /// drain on this service.
    pub fn drain_sync<H>(&self, on_item: &mut H)
    where
        H: ItemHandler + ?Sized,
    {
        let drain_id = self.state.next_drain_id();
        let _drain = lock_or_recover(&self.state.drain_guard, "drain guard");
        let snapshot = lock_or_recover(&self.state.pending, "pending").clone();

        let mut run = DrainRun::start(&self.state, DrainMode::Sync, drain_id, snapshot.len());
        run.process(&snapshot, on_item);
        remove_drained(&mut lock_or_recover(&self.state.pending, "pending"), &snapshot);
        run.finish();
    }

    /// Snapshot the pending queue and drain it later on the scheduler
    ///
    /// Returns as soon as the job is submitted; until the job runs,
    /// `pending_count` still reports the pre-drain size. When the job runs it
    /// hands every snapshot item to `on_item` in order and then empties the
    /// pending queue.
    ///
    /// Accepted race: that final reset also discards items added after the
    /// snapshot was taken but before the job finished. Serialize `add` with
    /// drain completion (for example by awaiting the `Completed` event) when
    /// this matters.
    ///
    /// Deferred drains on one service complete in the order they were
    /// requested. If the scheduler rejects the job, the failure is logged and
    /// the queue is left as it was; the same holds when a callback panics.
    pub fn drain_async<H>(&self, mut on_item: H)
    where
        H: ItemHandler + Send + 'static,
    {
        let snapshot = lock_or_recover(&self.state.pending, "pending").clone();
        let drain_id = self.state.next_drain_id();
        let scheduled_items = snapshot.len();
        let state = Arc::clone(&self.state);

        let job = Box::new(move || {
            let _drain = lock_or_recover(&state.drain_guard, "drain guard");
            let mut run = DrainRun::start(&state, DrainMode::Async, drain_id, snapshot.len());
            run.process(&snapshot, &mut on_item);
            lock_or_recover(&state.pending, "pending").clear();
            run.finish();
        });

        // Published first so subscribers never see Started before Scheduled
        self.state.notifier.publish(DrainEvent::new(
            DrainEventType::Scheduled,
            DrainMode::Async,
            drain_id,
            scheduled_items,
        ));

        match self.scheduler.submit(job) {
            Ok(()) => log::debug!(
                "Scheduled async drain {} with {} items",
                drain_id,
                scheduled_items
            ),
            Err(e) => {
                log::error!("Async drain {} was not scheduled: {}", drain_id, e);
                self.state.notifier.publish(DrainEvent::new(
                    DrainEventType::Rejected,
                    DrainMode::Async,
                    drain_id,
                    0,
                ));
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        lock_or_recover(&self.state.pending, "pending").len()
    }

    pub fn total_processed(&self) -> u64 {
        self.state.processed_total.load(Ordering::SeqCst)
    }

    /// Copy of the pending queue in insertion order
    pub fn pending_items(&self) -> Vec<String> {
        lock_or_recover(&self.state.pending, "pending").clone()
    }

    /// Receive lifecycle events for every drain on this service
    pub fn subscribe(&self, subscriber_id: impl Into<String>) -> EventReceiver {
        self.state.notifier.subscribe(subscriber_id)
    }

    pub fn unsubscribe(&self, subscriber_id: &str) -> bool {
        self.state.notifier.unsubscribe(subscriber_id)
    }
}
