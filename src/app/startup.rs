//! Application startup: configuration, logging and the drain run

use crate::app::cli::args::Args;
use crate::app::error::{AppError, AppResult};
use crate::app::report::DrainReport;
use crate::core::logging::init_logging;
use crate::core::sync::lock_or_recover;
use crate::core::version;
use crate::notifications::api::{DrainEvent, DrainEventType, DrainMode, EventReceiver};
use crate::queue::api::ItemQueueService;
use clap::Parser;
use colored::Colorize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const CLI_SUBSCRIBER: &str = "drainq-cli";

/// Parse arguments, run once and return the process exit code
pub async fn startup() -> i32 {
    let mut args = Args::parse();

    match execute(&mut args).await {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            1
        }
    }
}

async fn execute(args: &mut Args) -> AppResult<()> {
    args.load_config_file().await?;

    let use_color = args.use_color();
    colored::control::set_override(use_color);

    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().into_owned());
    init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    )
    .map_err(|e| AppError::Logging {
        message: e.to_string(),
    })?;

    log::info!("drainq {} starting", version::long_version());
    log::debug!("Resolved arguments: {:?}", args);

    let report = run(args).await?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

/// Build a service from the resolved arguments and perform one drain
///
/// Must be called from within a tokio runtime; deferred drains run on it.
pub async fn run(args: &Args) -> AppResult<DrainReport> {
    let service = ItemQueueService::on_current_runtime()?;

    for item in &args.items {
        service.add(item.as_str());
    }
    for item in &args.remove {
        service.remove(item)?;
    }
    if args.clear {
        service.clear();
    }

    let drained = Arc::new(Mutex::new(Vec::new()));
    let pending_before = service.pending_count();
    let mode = args.drain_mode();
    log::info!("Draining {} items ({} mode)", pending_before, mode);

    let pending_after_call = match mode {
        DrainMode::Sync => {
            service.drain_sync(&mut |item: &str| {
                lock_or_recover(&drained, "drained items").push(item.to_string())
            });
            service.pending_count()
        }
        DrainMode::Async => {
            let mut events = service.subscribe(CLI_SUBSCRIBER);
            let sink = Arc::clone(&drained);
            service.drain_async(move |item: &str| {
                lock_or_recover(&sink, "drained items").push(item.to_string())
            });
            let after_call = service.pending_count();

            let completed = await_completion(&mut events, args.drain_timeout_duration()).await?;
            log::debug!("Drain {} completed", completed.drain_id);
            service.unsubscribe(CLI_SUBSCRIBER);
            after_call
        }
    };

    let drained = lock_or_recover(&drained, "drained items").clone();
    Ok(DrainReport {
        mode,
        drained,
        pending_before,
        pending_after_call,
        pending_after_drain: service.pending_count(),
        total_processed: service.total_processed(),
    })
}

/// Wait for the Completed event of the drain announced by the first Scheduled event
async fn await_completion(events: &mut EventReceiver, limit: Duration) -> AppResult<DrainEvent> {
    let mut drain_id = None;

    let outcome = tokio::time::timeout(limit, async {
        loop {
            let Some(event) = events.recv().await else {
                return Err(AppError::EventsClosed);
            };
            match event.event_type {
                DrainEventType::Scheduled if drain_id.is_none() => {
                    drain_id = Some(event.drain_id);
                }
                DrainEventType::Rejected if Some(event.drain_id) == drain_id => {
                    return Err(AppError::DrainRejected {
                        drain_id: event.drain_id,
                    });
                }
                DrainEventType::Failed if Some(event.drain_id) == drain_id => {
                    return Err(AppError::DrainFailed {
                        drain_id: event.drain_id,
                        items: event.items,
                    });
                }
                DrainEventType::Completed if Some(event.drain_id) == drain_id => {
                    return Ok(event);
                }
                _ => {}
            }
        }
    })
    .await;

    match outcome {
        Ok(result) => result,
        Err(_) => Err(AppError::DrainTimeout {
            drain_id: drain_id.unwrap_or_default(),
            seconds: limit.as_secs(),
        }),
    }
}
