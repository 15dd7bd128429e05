//! DrainNotifier implementation

use crate::core::sync::lock_or_recover;
use crate::notifications::event::DrainEvent;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub type EventReceiver = UnboundedReceiver<DrainEvent>;

/// Fan-out of drain lifecycle events to named subscribers
///
/// Publishing never blocks and never fails: events are pushed into unbounded
/// channels, and subscribers whose receiver has been dropped are pruned on the
/// next publish. Publishing is safe from any thread, including scheduler
/// workers running outside a tokio context.
#[derive(Default)]
pub struct DrainNotifier {
    subscribers: Mutex<HashMap<String, UnboundedSender<DrainEvent>>>,
}

impl DrainNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber_id: impl Into<String>) -> EventReceiver {
        let subscriber_id = subscriber_id.into();
        let (sender, receiver) = unbounded_channel();

        let mut subscribers = lock_or_recover(&self.subscribers, "subscribers");
        if subscribers.insert(subscriber_id.clone(), sender).is_some() {
            log::warn!(
                "Subscriber '{}' replaced existing drain subscription",
                subscriber_id
            );
        }

        receiver
    }

    pub fn unsubscribe(&self, subscriber_id: &str) -> bool {
        lock_or_recover(&self.subscribers, "subscribers")
            .remove(subscriber_id)
            .is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        lock_or_recover(&self.subscribers, "subscribers").len()
    }

    pub fn has_subscriber(&self, subscriber_id: &str) -> bool {
        lock_or_recover(&self.subscribers, "subscribers").contains_key(subscriber_id)
    }

    /// Deliver an event to every live subscriber, returning how many received it
    pub fn publish(&self, event: DrainEvent) -> usize {
        let mut subscribers = lock_or_recover(&self.subscribers, "subscribers");
        let mut delivered = 0;

        subscribers.retain(|subscriber_id, sender| match sender.send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                log::trace!("Pruning closed drain subscriber '{}'", subscriber_id);
                false
            }
        });

        log::trace!(
            "Published {:?} for drain {} to {} subscribers",
            event.event_type,
            event.drain_id,
            delivered
        );
        delivered
    }
}
