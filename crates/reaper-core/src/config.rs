use std::time::Duration;

use reaper_model::MetadataSource;

/// Default pause between cycles.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Default termination cap per group per cycle.
pub const DEFAULT_MAX_TERMINATIONS_PER_GROUP: i64 = 5;

/// Process-wide reaper settings.
///
/// Built once at startup and handed to [`crate::Reaper`]; nothing in the core reads the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaperConfig {
    /// Map the well-known keys are read from.
    pub metadata_source: MetadataSource,
    /// Pause between cycles. Ignored when `run_once` is set.
    pub interval: Duration,
    /// Maximum successful terminations per group per cycle. Zero or negative disables termination.
    pub max_terminations_per_group: i64,
    /// Perform exactly one cycle and return.
    pub run_once: bool,
    /// Emit per-instance detail (start time, deadline) at debug level.
    pub verbose: bool,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            metadata_source: MetadataSource::default(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            max_terminations_per_group: DEFAULT_MAX_TERMINATIONS_PER_GROUP,
            run_once: false,
            verbose: false,
        }
    }
}

impl ReaperConfig {
    pub fn with_metadata_source(mut self, source: MetadataSource) -> Self {
        self.metadata_source = source;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_terminations_per_group(mut self, cap: i64) -> Self {
        self.max_terminations_per_group = cap;
        self
    }

    pub fn with_run_once(mut self, run_once: bool) -> Self {
        self.run_once = run_once;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns `true` if the cap allows any termination at all.
    pub fn termination_enabled(&self) -> bool {
        self.max_terminations_per_group > 0
    }
}
