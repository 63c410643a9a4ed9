//! Cycle driver.
//!
//! One cycle lists all groups, then handles them strictly one after another: exemption check,
//! instance listing, evaluation and termination up to the per-group cap. Between cycles the
//! driver sleeps for the configured interval, or returns in run-once mode.
mod report;
pub use report::{CycleReport, GroupOutcome};


use std::{sync::Arc, time::Instant};

use reaper_model::{Group, Instance};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    clock::{Clock, SystemClock},
    cluster::Cluster,
    config::ReaperConfig,
    error::CoreError,
    lookup::MetadataLookup,
    metrics::{GroupDisposition, MetricsHandle, TerminationOutcome, noop_metrics},
    policy::{Decision, Governor, GovernorState, GroupReport, evaluate, is_exempt},
};

/// Lifetime reaper over a [`Cluster`].
pub struct Reaper {
    cluster: Arc<dyn Cluster>,
    clock: Arc<dyn Clock>,
    metrics: MetricsHandle,
    lookup: MetadataLookup,
    config: ReaperConfig,
}

impl Reaper {
    /// Create a reaper using the wall clock and no-op metrics.
    pub fn new(cluster: Arc<dyn Cluster>, config: ReaperConfig) -> Self {
        Self {
            cluster,
            clock: Arc::new(SystemClock),
            metrics: noop_metrics(),
            lookup: MetadataLookup::new(config.metadata_source),
            config,
        }
    }

    /// Replace the clock and return updated reaper.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the metrics backend and return updated reaper.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run cycles until cancelled, or once in run-once mode.
    ///
    /// Cancellation is only observed between cycles; a cycle in progress always completes.
    /// Returns an error only when group enumeration fails.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), CoreError> {
        info!(
            cluster = self.cluster.name(),
            source = %self.config.metadata_source,
            interval_secs = self.config.interval.as_secs(),
            max_terminations_per_group = self.config.max_terminations_per_group,
            run_once = self.config.run_once,
            "reaper started"
        );
        if !self.config.termination_enabled() {
            warn!(
                max_terminations_per_group = self.config.max_terminations_per_group,
                "termination cap is zero or less; overdue instances will only be reported"
            );
        }

        loop {
            self.run_cycle().await?;

            if self.config.run_once {
                info!("run-once mode: cycle finished, exiting");
                return Ok(());
            }

            info!(
                seconds = self.config.interval.as_secs(),
                "now sleeping until next cycle"
            );
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("shutdown requested, stopping between cycles");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    /// Run one full pass over all groups.
    #[instrument(level = "debug", skip(self), fields(cluster = self.cluster.name()))]
    pub async fn run_cycle(&self) -> Result<CycleReport, CoreError> {
        let started = Instant::now();
        let groups = self
            .cluster
            .list_groups()
            .await
            .map_err(CoreError::ListGroups)?;
        debug!(groups = groups.len(), "groups listed");

        let mut report = CycleReport::default();
        for group in &groups {
            report.groups.push(self.run_group(group).await);
        }

        self.metrics
            .record_cycle_completed(started.elapsed().as_millis() as u64);
        Ok(report)
    }

    async fn run_group(&self, group: &Group) -> GroupOutcome {
        let name = group.name();

        if is_exempt(group, &self.lookup) {
            info!(group = name, "group exempt from lifetime enforcement");
            self.metrics.record_group(GroupDisposition::Exempt);
            return GroupOutcome::Exempt {
                group: name.to_string(),
            };
        }

        let instances = match self.cluster.list_instances(name).await {
            Ok(instances) => instances,
            Err(e) => {
                warn!(group = name, error = %e, "failed to list instances, skipping group this cycle");
                self.metrics.record_group(GroupDisposition::ListFailed);
                return GroupOutcome::ListFailed {
                    group: name.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let now = self.clock.now();
        let report = self.process_group(group, &instances, now).await;
        self.metrics.record_group(GroupDisposition::Processed);
        GroupOutcome::Processed(report)
    }

    /// Evaluate a group's instances in listing order and terminate overdue ones up to the cap.
    ///
    /// Stops at the first overdue instance found once the cap is reached; later instances are
    /// not evaluated.
    pub async fn process_group(
        &self,
        group: &Group,
        instances: &[Instance],
        now: OffsetDateTime,
    ) -> GroupReport {
        let name = group.name();
        let verbose = self.config.verbose;
        let mut governor = Governor::new(self.config.max_terminations_per_group);
        let mut report = GroupReport::new(name);

        for instance in instances {
            report.evaluated += 1;
            if verbose {
                debug!(group = name, instance = instance.name(), "considering instance");
            }

            match evaluate(instance, &self.lookup, now) {
                Decision::NotDeclared | Decision::NotRunning => {}
                Decision::Malformed { raw, declaration } => {
                    report.malformed += 1;
                    self.metrics.record_malformed();
                    warn!(
                        group = name,
                        instance = instance.name(),
                        value = %raw,
                        kind = declaration.kind(),
                        parsed = %declaration,
                        "skipping instance: lifetime value is incorrect"
                    );
                }
                Decision::Pending { started, deadline } => {
                    if verbose {
                        debug!(
                            group = name,
                            instance = instance.name(),
                            start_time = %started,
                            deadline = ?deadline,
                            "instance within its lifetime"
                        );
                    }
                }
                Decision::Overdue { started, deadline } => {
                    report.overdue += 1;
                    if verbose {
                        debug!(
                            group = name,
                            instance = instance.name(),
                            start_time = %started,
                            deadline = %deadline,
                            "instance exceeded its lifetime"
                        );
                    }

                    if governor.state() == GovernorState::Capped {
                        report.skipped_due_to_cap = true;
                        self.metrics.record_cap_reached();
                        info!(
                            group = name,
                            cap = governor.cap(),
                            "max terminations reached, skipping remaining instances in group"
                        );
                        break;
                    }

                    match self.cluster.terminate(name, instance.name()).await {
                        Ok(()) => {
                            governor.record_success();
                            report.terminated += 1;
                            self.metrics.record_termination(TerminationOutcome::Success);
                            info!(group = name, instance = instance.name(), "instance terminated");
                        }
                        Err(e) => {
                            report.failed += 1;
                            self.metrics.record_termination(TerminationOutcome::Failure);
                            error!(
                                group = name,
                                instance = instance.name(),
                                error = %e,
                                "failed to terminate instance"
                            );
                        }
                    }
                }
            }
        }

        report
    }
}
