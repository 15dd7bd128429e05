//! Command-line arguments
//!
//! This module contains the Args struct definition and its resolution helpers.
//! TOML loading is handled by the config module.

use crate::notifications::api::DrainMode;
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

/// Default wait for a deferred drain to report completion
pub const DEFAULT_DRAIN_TIMEOUT_SECS: u64 = 30;

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
pub const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];
pub const DRAIN_MODES: [&str; 2] = ["sync", "async"];

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "drainq")]
#[command(about = "Queue items, then drain them immediately or on a deferred worker")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(after_help = " * can be specified multiple times")]
pub struct Args {
    /// Items to add to the queue, in order
    #[arg(value_name = "ITEMS")]
    pub items: Vec<String>,

    /// Items to remove after adding*
    #[arg(short = 'r', long = "remove", value_name = "ITEM", action = ArgAction::Append)]
    pub remove: Vec<String>,

    /// Clear the queue before draining
    #[arg(long = "clear")]
    pub clear: bool,

    /// Drain mode
    #[arg(short = 'm', long = "mode", value_name = "MODE", value_parser = DRAIN_MODES)]
    pub mode: Option<String>,

    /// Seconds to wait for a deferred drain to complete
    #[arg(short = 't', long = "drain-timeout", value_name = "SECONDS")]
    pub drain_timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Force coloured output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    /// Print the report as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved drain mode (sync unless configured otherwise)
    pub fn drain_mode(&self) -> DrainMode {
        match self.mode.as_deref() {
            Some("async") => DrainMode::Async,
            _ => DrainMode::Sync,
        }
    }

    /// Drain timeout as Duration (enforces a minimum of one second)
    pub fn drain_timeout_duration(&self) -> Duration {
        let secs = self.drain_timeout.unwrap_or(DEFAULT_DRAIN_TIMEOUT_SECS);
        Duration::from_secs(secs.max(1))
    }

    /// Whether output should be coloured: explicit flags win, otherwise TTY detection
    pub fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            std::io::stdout().is_terminal()
        }
    }
}
