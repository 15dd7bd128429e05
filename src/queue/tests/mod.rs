//! Test modules for the item queue
//!
//! Tests are organized by functional area. They assert on effects only:
//! recorded callback invocations, pending/processed observations and
//! lifecycle events.

mod edge_cases;
mod helpers;
