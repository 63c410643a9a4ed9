//! Cluster port: the listing and termination calls the reaper depends on.
//!
//! Concrete backends implement [`Cluster`]; the core never talks to a cluster API directly.
mod error;
pub use error::ClusterError;

mod memory;
pub use memory::MemoryCluster;

use async_trait::async_trait;
use reaper_model::{Group, Instance};

/// Capabilities the reaper consumes from its environment.
///
/// Calls are issued one at a time, never concurrently within a cycle.
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Backend name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// List every group. Called once per cycle; failure is fatal to the run.
    async fn list_groups(&self) -> Result<Vec<Group>, ClusterError>;

    /// List the instances of one group, in a stable order for the duration of the call.
    async fn list_instances(&self, group: &str) -> Result<Vec<Instance>, ClusterError>;

    /// Terminate one instance.
    async fn terminate(&self, group: &str, instance: &str) -> Result<(), ClusterError>;
}
