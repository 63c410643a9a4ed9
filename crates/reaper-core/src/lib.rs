//! Decision engine of the lifetime reaper.
//!
//! - [`policy`] holds the pure stages: group filter and instance evaluator, plus the
//!   per-group termination governor.
//! - [`reaper`] drives cycles over a [`cluster::Cluster`].
pub mod clock;
pub mod cluster;
pub mod config;
pub mod error;
pub mod lookup;
pub mod metrics;
pub mod policy;
pub mod reaper;

pub use clock::{Clock, FixedClock, SystemClock};
pub use cluster::{Cluster, ClusterError, MemoryCluster};
pub use config::ReaperConfig;
pub use error::CoreError;
pub use lookup::MetadataLookup;
pub use metrics::{
    GroupDisposition, MetricsBackend, MetricsHandle, NoOpMetrics, TerminationOutcome,
    noop_metrics,
};
pub use policy::{Decision, Governor, GovernorState, GroupReport, evaluate, is_exempt};
pub use reaper::{CycleReport, GroupOutcome, Reaper};

pub mod prelude {
    pub use crate::cluster::{Cluster, ClusterError};
    pub use crate::config::ReaperConfig;
    pub use crate::error::CoreError;
    pub use crate::reaper::Reaper;
}
