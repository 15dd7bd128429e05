//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Item not found in pending queue: {item}")]
    NotFound { item: String },

    #[error("Drain scheduler unavailable: {message}")]
    SchedulerUnavailable { message: String },
}

impl QueueError {
    /// The missing item, for `NotFound` failures
    pub fn missing_item(&self) -> Option<&str> {
        match self {
            QueueError::NotFound { item } => Some(item),
            _ => None,
        }
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
