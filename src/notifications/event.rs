//! Event types for drain lifecycle notifications

use serde::Serialize;
use std::fmt;
use std::time::SystemTime;

/// How a drain was invoked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrainMode {
    Sync,
    Async,
}

impl fmt::Display for DrainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainMode::Sync => write!(f, "sync"),
            DrainMode::Async => write!(f, "async"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrainEventType {
    /// Snapshot taken and job handed to the scheduler (async only)
    Scheduled,
    /// Item loop is about to run
    Started,
    /// Item loop finished and the pending queue was reset
    Completed,
    /// Scheduler refused the job; the drain will never run
    Rejected,
    /// A callback panicked mid-loop; the pending queue was left as it was
    Failed,
}

#[derive(Clone, Debug)]
pub struct DrainEvent {
    pub event_type: DrainEventType,
    pub mode: DrainMode,
    pub drain_id: u64,
    /// Snapshot size for Scheduled/Started, items handed to the callback for
    /// Completed/Failed
    pub items: usize,
    pub timestamp: SystemTime,
}

impl DrainEvent {
    pub fn new(event_type: DrainEventType, mode: DrainMode, drain_id: u64, items: usize) -> Self {
        Self {
            event_type,
            mode,
            drain_id,
            items,
            timestamp: SystemTime::now(),
        }
    }

    pub fn is_completion_of(&self, drain_id: u64) -> bool {
        self.event_type == DrainEventType::Completed && self.drain_id == drain_id
    }

    /// Whether this is the last event `drain_id` will ever publish
    pub fn is_end_of(&self, drain_id: u64) -> bool {
        self.drain_id == drain_id
            && matches!(
                self.event_type,
                DrainEventType::Completed | DrainEventType::Failed | DrainEventType::Rejected
            )
    }
}
