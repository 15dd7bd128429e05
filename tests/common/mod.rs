//! Common test utilities and helpers

#![allow(dead_code)]

use clap::Parser;
use drainq::app::cli::args::Args;
use std::path::PathBuf;

pub static COMMAND_NAME: &str = "drainq";

/// Parse a command line without the program name
pub fn parse_args(argv: &[&str]) -> Args {
    let mut full = vec![COMMAND_NAME];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).unwrap()
}

/// Write a configuration file into `dir` and return its path
pub fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("drainq.toml");
    std::fs::write(&path, contents).unwrap();
    path
}
