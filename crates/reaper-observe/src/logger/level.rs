use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::error::{LoggerError, LoggerResult};

/// Validated `EnvFilter` expression.
///
/// Stores the raw expression so it can be serialized back unchanged; the filter itself is built
/// on demand with [`LoggerLevel::to_env_filter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(s: impl Into<String>) -> LoggerResult<Self> {
        Self::try_from(s.into())
    }

    /// `debug` for each target, `info` for everything else.
    pub(crate) fn debug_for(targets: &[&str]) -> Self {
        let mut expr: String = targets.iter().map(|t| format!("{t}=debug,")).collect();
        expr.push_str("info");
        Self(expr)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_env_filter(&self) -> LoggerResult<EnvFilter> {
        EnvFilter::try_new(&self.0).map_err(|e| LoggerError::InvalidLevel(format!("{}: {e}", self.0)))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> LoggerResult<Self> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> LoggerResult<Self> {
        let level = LoggerLevel(s);
        level.to_env_filter()?;
        Ok(level)
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}
