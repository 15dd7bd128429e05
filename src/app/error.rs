//! Application error types

use crate::queue::api::QueueError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Drain {drain_id} was rejected by the scheduler")]
    DrainRejected { drain_id: u64 },

    #[error("Drain {drain_id} failed after {items} item(s): a callback panicked")]
    DrainFailed { drain_id: u64, items: usize },

    #[error("Drain event stream closed before the drain completed")]
    EventsClosed,

    #[error("Timed out after {seconds}s waiting for drain {drain_id} to complete")]
    DrainTimeout { drain_id: u64, seconds: u64 },

    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
