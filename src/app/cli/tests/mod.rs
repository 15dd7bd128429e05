//! Tests for the CLI module
//!
//! Argument parsing and resolution tests. Configuration file tests live
//! alongside the config module.
