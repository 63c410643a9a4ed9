use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{format::LoggerFormat, level::LoggerLevel, timezone::LoggerTimeZone};

/// Crates raised to `debug` in verbose mode.
const VERBOSE_TARGETS: &[&str] = &["reaper_core", "reaper_kube", "reaper_agentd"];

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"reaper_core=debug,info"`).
    pub level: LoggerLevel,
    /// Timezone of event timestamps.
    pub tz: LoggerTimeZone,
    /// Print event targets (module paths).
    pub with_targets: bool,
    /// Use ANSI colors when stdout is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Default configuration, with the reaper crates at `debug` when `verbose` is set.
    pub fn for_verbosity(verbose: bool) -> Self {
        let mut cfg = Self::default();
        if verbose {
            cfg.level = LoggerLevel::debug_for(VERBOSE_TARGETS);
        }
        cfg
    }

    /// Returns `true` if colors are enabled and stdout is a terminal.
    ///
    /// Checked at install time, so redirecting output disables colors.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
