//! Complete runs of the drain command without spawning a process

use crate::common::parse_args;
use drainq::app::error::AppError;
use drainq::app::startup::run;
use drainq::notifications::api::DrainMode;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_run_processes_in_insertion_order() {
    let args = parse_args(&["C", "A", "B", "A"]);

    let report = run(&args).await.unwrap();

    assert_eq!(report.drained, vec!["C", "A", "B", "A"]);
    assert_eq!(report.total_processed, 4);
    assert_eq!(report.pending_after_call, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_run_on_multi_thread_runtime() {
    let args = parse_args(&["A", "B", "C", "-r", "A", "-m", "async"]);

    let report = run(&args).await.unwrap();

    assert_eq!(report.mode, DrainMode::Async);
    assert_eq!(report.drained, vec!["B", "C"]);
    assert_eq!(report.pending_before, 2);
    assert_eq!(report.pending_after_drain, 0);
    assert_eq!(report.total_processed, 2);
}

#[tokio::test]
async fn test_empty_async_run_completes() {
    let args = parse_args(&["--mode", "async"]);

    let report = run(&args).await.unwrap();

    assert!(report.drained.is_empty());
    assert_eq!(report.pending_after_call, 0);
    assert_eq!(report.total_processed, 0);
}

#[tokio::test]
async fn test_removing_unknown_item_is_an_error() {
    let args = parse_args(&["A", "--remove", "missing"]);

    match run(&args).await {
        Err(AppError::Queue(e)) => assert_eq!(e.missing_item(), Some("missing")),
        other => panic!("Expected queue error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_json_report_shape() {
    let args = parse_args(&["X", "--json"]);

    let report = run(&args).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["mode"], "sync");
    assert_eq!(value["drained"], serde_json::json!(["X"]));
}
