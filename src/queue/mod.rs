//! Item Queue Component
//!
//! An in-memory queue of pending string items whose mutating operations
//! return nothing. Callers verify behaviour through effects: the item
//! callbacks, the pending/processed observations and drain lifecycle events.
//!
//! # Overview
//!
//! - **add / remove / clear** mutate the pending queue in place
//! - **drain_sync** hands every pending item to a callback immediately
//! - **drain_async** snapshots the queue now and drains it later on a
//!   [`DrainScheduler`](api::DrainScheduler)
//! - **pending_count / total_processed** observe the two pieces of state
//!
//! # Drain model
//!
//! ```text
//!  add("A") add("B") add("C")
//!         │
//!         ▼
//! ┌───────────────────┐   drain_async(cb)   ┌───────────────────────┐
//! │ pending [A, B, C] │ ──── snapshot ────▶ │ scheduler (FIFO jobs) │
//! └───────────────────┘                     └───────────┬───────────┘
//!         ▲                                             │ later
//!         │ reset to []                                 ▼
//!         └───────────────────────────── cb(A), cb(B), cb(C); processed += 3
//! ```
//!
//! Every drain holds a drain guard for its whole item loop, so the items of
//! two drains never interleave.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use drainq::queue::api::ItemQueueService;
//! use drainq::notifications::api::DrainEventType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ItemQueueService::on_current_runtime()?;
//! let mut events = service.subscribe("example");
//!
//! service.add("A");
//! service.add("B");
//! service.drain_async(|item: &str| println!("processing {}", item));
//!
//! // The service has no "await drain"; wait for the lifecycle event instead
//! while let Some(event) = events.recv().await {
//!     if event.event_type == DrainEventType::Completed {
//!         break;
//!     }
//! }
//! assert_eq!(service.pending_count(), 0);
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
mod scheduler;
mod service;

pub mod api;

#[cfg(test)]
mod tests;
