//! Public API for the item queue
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for usage examples and the drain model.

// Core service
pub use crate::queue::service::ItemQueueService;

// Item callbacks
pub use crate::queue::handler::ItemHandler;

// Deferred drain scheduling
pub use crate::queue::scheduler::{DrainJob, DrainScheduler, ManualScheduler, TokioScheduler};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};
