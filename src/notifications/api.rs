//! Public API for drain notifications
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::notifications::event::{DrainEvent, DrainEventType, DrainMode};
pub use crate::notifications::manager::{DrainNotifier, EventReceiver};
