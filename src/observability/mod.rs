//! Observability module for monitoring and metrics.
//!
//! Operation counters and timing for the address book service, reported
//! through structured `tracing` events.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
