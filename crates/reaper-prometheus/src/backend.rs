use std::sync::Arc;

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use reaper_core::{GroupDisposition, MetricsBackend, TerminationOutcome};

const NAMESPACE: &str = "reaper";

/// Prometheus metrics backend for the reaper.
///
/// Label values are bounded: `disposition` is one of `exempt`, `processed`, `list_failed`, and
/// `outcome` is `success` or `failure`.
#[derive(Clone)]
pub struct PrometheusMetrics {
    cycles: IntCounter,
    cycle_duration: Histogram,
    groups: IntCounterVec,
    terminations: IntCounterVec,
    malformed: IntCounter,
    cap_reached: IntCounter,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create the backend and register its metrics in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let cycles = IntCounter::with_opts(
            Opts::new("cycles_total", "Completed reaper cycles").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(cycles.clone()))?;

        let cycle_duration = Histogram::with_opts(
            HistogramOpts::new("cycle_duration_seconds", "Duration of one reaper cycle")
                .namespace(NAMESPACE)
                .buckets(vec![0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 300.0]),
        )?;
        registry.register(Box::new(cycle_duration.clone()))?;

        let groups = IntCounterVec::new(
            Opts::new("groups_total", "Groups handled, by disposition").namespace(NAMESPACE),
            &["disposition"],
        )?;
        registry.register(Box::new(groups.clone()))?;

        let terminations = IntCounterVec::new(
            Opts::new("terminations_total", "Termination attempts, by outcome")
                .namespace(NAMESPACE),
            &["outcome"],
        )?;
        registry.register(Box::new(terminations.clone()))?;

        let malformed = IntCounter::with_opts(
            Opts::new(
                "malformed_lifetimes_total",
                "Instances skipped because of an incorrect lifetime value",
            )
            .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(malformed.clone()))?;

        let cap_reached = IntCounter::with_opts(
            Opts::new(
                "cap_reached_total",
                "Groups whose remaining instances were skipped at the termination cap",
            )
            .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(cap_reached.clone()))?;

        Ok(Self {
            cycles,
            cycle_duration,
            groups,
            terminations,
            malformed,
            cap_reached,
            registry,
        })
    }

    /// Create the backend with a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.gather())
    }

    /// Content type of [`PrometheusMetrics::encode_text`] output.
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_cycle_completed(&self, duration_ms: u64) {
        self.cycles.inc();
        self.cycle_duration.observe(duration_ms as f64 / 1000.0);
    }

    fn record_group(&self, disposition: GroupDisposition) {
        self.groups
            .with_label_values(&[disposition.as_label()])
            .inc();
    }

    fn record_termination(&self, outcome: TerminationOutcome) {
        self.terminations
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    fn record_malformed(&self) {
        self.malformed.inc();
    }

    fn record_cap_reached(&self) {
        self.cap_reached.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn cycle_updates_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_cycle_completed(250);
        metrics.record_cycle_completed(1500);

        assert_eq!(metrics.cycles.get(), 2);
        assert_eq!(metrics.cycle_duration.get_sample_count(), 2);
        assert!(metrics.gather().iter().any(|f| f.name() == "reaper_cycle_duration_seconds"));
    }

    #[test]
    fn groups_are_split_by_disposition() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_group(GroupDisposition::Processed);
        metrics.record_group(GroupDisposition::Processed);
        metrics.record_group(GroupDisposition::Exempt);

        let families = metrics.gather();
        assert_eq!(family(&families, "reaper_groups_total").get_metric().len(), 2);
        assert_eq!(
            metrics
                .groups
                .with_label_values(&[GroupDisposition::Processed.as_label()])
                .get(),
            2
        );
    }

    #[test]
    fn terminations_are_split_by_outcome() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_termination(TerminationOutcome::Success);
        metrics.record_termination(TerminationOutcome::Failure);
        metrics.record_termination(TerminationOutcome::Success);

        assert_eq!(metrics.terminations.with_label_values(&["success"]).get(), 2);
        assert_eq!(metrics.terminations.with_label_values(&["failure"]).get(), 1);
    }

    #[test]
    fn text_output_contains_counters() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_malformed();
        metrics.record_cap_reached();

        let body = metrics.encode_text().unwrap();
        assert!(body.contains("reaper_malformed_lifetimes_total 1"));
        assert!(body.contains("reaper_cap_reached_total 1"));
        assert!(metrics.content_type().starts_with("text/plain"));
    }

    #[test]
    fn shared_registry_rejects_double_registration() {
        let registry = Arc::new(Registry::new());
        let _first = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();
        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}
