use thiserror::Error;

use crate::cluster::ClusterError;

/// Errors that end a reaper run.
///
/// Everything below group level is logged and absorbed inside the cycle; only the
/// top-level group enumeration can fail the whole process.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to list groups: {0}")]
    ListGroups(#[source] ClusterError),
}
