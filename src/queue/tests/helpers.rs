//! Shared fixtures for queue tests

use crate::notifications::api::{DrainEvent, DrainEventType, EventReceiver};
use crate::queue::api::{ItemHandler, ItemQueueService, ManualScheduler};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every item it is handed; clones share the record
#[derive(Clone, Default)]
pub struct ItemRecorder {
    seen: Arc<Mutex<Vec<String>>>,
}

impl ItemRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl ItemHandler for ItemRecorder {
    fn handle(&mut self, item: &str) {
        self.seen.lock().unwrap().push(item.to_string());
    }
}

/// Service whose deferred drains only run when the test says so
pub fn manual_service() -> (ItemQueueService, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let service = ItemQueueService::new(scheduler.clone());
    (service, scheduler)
}

pub fn service_with(items: &[&str]) -> (ItemQueueService, Arc<ManualScheduler>) {
    let (service, scheduler) = manual_service();
    for item in items {
        service.add(*item);
    }
    (service, scheduler)
}

/// Wait for the next Completed event, failing the test after a generous timeout
pub async fn next_completion(events: &mut EventReceiver) -> DrainEvent {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let event = events.recv().await.expect("event channel closed");
            if event.event_type == DrainEventType::Completed {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for drain completion")
}

/// Wait for the terminal event (Completed, Failed or Rejected) of `drain_id`
pub async fn next_end_of(events: &mut EventReceiver, drain_id: u64) -> DrainEvent {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let event = events.recv().await.expect("event channel closed");
            if event.is_end_of(drain_id) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for the drain to end")
}

/// Collect every event already delivered without waiting
pub fn drain_events(events: &mut EventReceiver) -> Vec<DrainEvent> {
    let mut collected = Vec::new();
    while let Ok(event) = events.try_recv() {
        collected.push(event);
    }
    collected
}
