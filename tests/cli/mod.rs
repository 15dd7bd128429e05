//! CLI Integration Test Modules

pub mod run_modes;
pub mod toml_config;
