use std::{fmt, str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::logger::error::LoggerError;

/// Local offset captured at startup.
static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Timezone of log timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    #[default]
    Utc,
    /// System offset, detected once by [`init_local_offset`].
    Local,
}

impl LoggerTimeZone {
    /// Offset applied to timestamps.
    pub(crate) fn offset(self) -> UtcOffset {
        match self {
            LoggerTimeZone::Utc => UtcOffset::UTC,
            LoggerTimeZone::Local => local_offset(),
        }
    }
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// Detect and cache the local UTC offset.
///
/// Must run in `main` before any other thread exists: offset detection refuses to work in a
/// multi-threaded process on most Unix platforms. Falls back to UTC when detection fails.
pub fn init_local_offset() {
    LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
}

fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_utc() {
        assert_eq!(LoggerTimeZone::default(), LoggerTimeZone::Utc);
        assert_eq!(LoggerTimeZone::Utc.offset(), UtcOffset::UTC);
    }

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("UTC".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Utc);
        assert_eq!("Local".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Local);
        assert!("pst".parse::<LoggerTimeZone>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&LoggerTimeZone::Local).unwrap(), r#""local""#);
        let tz: LoggerTimeZone = serde_json::from_str(r#""utc""#).unwrap();
        assert_eq!(tz, LoggerTimeZone::Utc);
    }

    #[test]
    fn local_offset_is_sane_after_init() {
        init_local_offset();
        assert!(LoggerTimeZone::Local.offset().whole_hours().abs() <= 14);
    }
}
