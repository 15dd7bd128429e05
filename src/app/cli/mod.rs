//! CLI module containing argument parsing and configuration file handling

pub mod args;
pub mod config;

#[cfg(test)]
mod tests;
