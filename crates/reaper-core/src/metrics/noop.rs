use crate::metrics::backend::{GroupDisposition, MetricsBackend, TerminationOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_cycle_completed(&self, _: u64) {}

    #[inline(always)]
    fn record_group(&self, _: GroupDisposition) {}

    #[inline(always)]
    fn record_termination(&self, _: TerminationOutcome) {}

    #[inline(always)]
    fn record_malformed(&self) {}

    #[inline(always)]
    fn record_cap_reached(&self) {}
}
