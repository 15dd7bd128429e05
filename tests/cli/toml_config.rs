//! CLI TOML configuration tests
//!
//! Configuration loading through the public API with CLI overrides.

use crate::common::{parse_args, write_config};
use drainq::app::cli::args::Args;
use drainq::app::error::AppError;
use drainq::notifications::api::DrainMode;
use std::time::Duration;
use toml::Table;

#[tokio::test]
async fn test_config_file_supplies_items_and_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        items = ["A", "B", "C"]
        remove = ["B"]
        mode = "async"
        drain-timeout = 10
        "#,
    );

    let mut args = parse_args(&["-c", path.to_str().unwrap(), "D"]);
    args.load_config_file().await.unwrap();

    assert_eq!(args.items, vec!["A", "B", "C", "D"]);
    assert_eq!(args.remove, vec!["B"]);
    assert_eq!(args.drain_mode(), DrainMode::Async);
    assert_eq!(args.drain_timeout_duration(), Duration::from_secs(10));
}

#[tokio::test]
async fn test_cli_mode_overrides_config_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "mode = \"async\"\n");

    let mut args = parse_args(&["-c", path.to_str().unwrap(), "--mode", "sync"]);
    args.load_config_file().await.unwrap();

    assert_eq!(args.drain_mode(), DrainMode::Sync);
}

#[tokio::test]
async fn test_unknown_config_key_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "plugin-dir = \"/tmp\"\n");

    let mut args = parse_args(&["-c", path.to_str().unwrap()]);
    let err = args.load_config_file().await.unwrap_err();

    assert!(matches!(err, AppError::InvalidValue { ref key, .. } if key == "plugin-dir"));
}

#[test]
fn test_apply_table_built_in_code() {
    let mut args = Args::default();
    let mut config = Table::new();
    config.insert("clear".to_string(), toml::Value::Boolean(true));
    config.insert(
        "log-level".to_string(),
        toml::Value::String("trace".to_string()),
    );

    Args::apply_toml_values(&mut args, &config).unwrap();

    assert!(args.clear);
    assert_eq!(args.log_level.as_deref(), Some("trace"));
}
