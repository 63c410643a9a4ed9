use std::sync::Arc;

/// How a group was handled in a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDisposition {
    /// Group carried the exemption flag and was skipped.
    Exempt,
    /// Instances were listed and evaluated.
    Processed,
    /// Instance listing failed; the group was skipped for the cycle.
    ListFailed,
}

impl GroupDisposition {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            GroupDisposition::Exempt => "exempt",
            GroupDisposition::Processed => "processed",
            GroupDisposition::ListFailed => "list_failed",
        }
    }
}

/// Result of a single termination call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationOutcome {
    Success,
    Failure,
}

impl TerminationOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            TerminationOutcome::Success => "success",
            TerminationOutcome::Failure => "failure",
        }
    }
}

/// Backend metrics collection interface.
///
/// Labels are kept low-cardinality: group and instance names are never used as label values.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a finished cycle and how long it took.
    fn record_cycle_completed(&self, duration_ms: u64);
    /// Record how one group was handled in a cycle.
    fn record_group(&self, disposition: GroupDisposition);
    /// Record a termination attempt.
    fn record_termination(&self, outcome: TerminationOutcome);
    /// Record an instance skipped because of an incorrect lifetime value.
    fn record_malformed(&self);
    /// Record a group that hit its termination cap.
    fn record_cap_reached(&self);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
