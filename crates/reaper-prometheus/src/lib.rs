//! Prometheus backend for [`reaper_core::MetricsBackend`].
//!
//! ```rust
//! use std::sync::Arc;
//! use reaper_core::{MemoryCluster, Reaper, ReaperConfig};
//! use reaper_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let reaper = Reaper::new(Arc::new(MemoryCluster::new()), ReaperConfig::default())
//!     .with_metrics(Arc::new(metrics.clone()));
//!
//! let body = metrics.encode_text()?;
//! # let _ = (reaper, body);
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `reaper_cycles_total` - Counter
//! - `reaper_cycle_duration_seconds` - Histogram
//! - `reaper_groups_total{disposition}` - Counter
//! - `reaper_terminations_total{outcome}` - Counter
//! - `reaper_malformed_lifetimes_total` - Counter
//! - `reaper_cap_reached_total` - Counter
//!
//! No HTTP server lives here; the daemon serves [`PrometheusMetrics::encode_text`] itself.
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
