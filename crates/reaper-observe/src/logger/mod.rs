mod config;
mod error;
mod format;
mod install;
mod level;
mod timer;
mod timezone;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use timezone::{LoggerTimeZone, init_local_offset};

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails if a global subscriber is already set. With [`LoggerTimeZone::Local`], call
/// [`init_local_offset`] first, before the tokio runtime starts any threads.
///
/// ```rust
/// use reaper_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => install::text(cfg),
        LoggerFormat::Json => install::json(cfg),
        LoggerFormat::Journald => install::journald(cfg),
    }
}
