//! Metrics collection abstraction for the reaper.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected into
//! [`crate::Reaper`] through [`crate::Reaper::with_metrics`].
mod backend;
pub use backend::{GroupDisposition, MetricsBackend, MetricsHandle, TerminationOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
