use std::{net::SocketAddr, time::Duration};

use clap::{ArgAction, Parser, builder::FalseyValueParser};
use reaper_core::{
    ReaperConfig,
    config::{DEFAULT_INTERVAL_SECS, DEFAULT_MAX_TERMINATIONS_PER_GROUP},
};
use reaper_kube::{DEFAULT_TIMEOUT, KubeConfig, KubeError};
use reaper_model::MetadataSource;
use reaper_observe::{LoggerConfig, LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Terminates pods that outlive the lifetime declared in their metadata.
#[derive(Debug, Parser)]
#[command(name = "reaper-agentd", version)]
pub struct Args {
    /// Map holding the lifetime and exemption keys (labels|annotations).
    #[arg(long, env = "METADATA_SOURCE", default_value = "labels")]
    pub metadata_source: MetadataSource,

    /// Seconds to sleep between cycles; must be at least 1.
    #[arg(
        long,
        env = "INTERVAL_IN_SEC",
        default_value_t = DEFAULT_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    /// Maximum pods terminated per namespace per cycle; zero or less disables termination.
    #[arg(
        long,
        env = "MAX_KILLED_PODS_NS",
        default_value_t = DEFAULT_MAX_TERMINATIONS_PER_GROUP,
        allow_negative_numbers = true
    )]
    pub max_killed_pods: i64,

    /// Run a single cycle and exit.
    #[arg(long, env = "RUN_ONCE", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    pub run_once: bool,

    /// Log per-pod start time and deadline.
    #[arg(short = 'v', long = "debug", env = "DEBUG", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    pub debug: bool,

    /// API server URL without credentials (e.g. `kubectl proxy`); in-cluster config otherwise.
    #[arg(long, env = "KUBE_API_SERVER")]
    pub api_server: Option<String>,

    /// Timeout of each Kubernetes API request, in seconds.
    #[arg(
        long,
        env = "KUBE_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,

    /// Serve Prometheus metrics on this address.
    #[arg(long, env = "METRICS_ADDR")]
    pub metrics_addr: Option<SocketAddr>,

    /// Log output (text|json|journald).
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Log filter expression; overrides the level implied by --debug.
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<LoggerLevel>,

    /// Timezone of log timestamps (utc|local).
    #[arg(long, env = "LOG_TZ", default_value = "utc")]
    pub log_tz: LoggerTimeZone,
}

impl Args {
    pub fn reaper_config(&self) -> ReaperConfig {
        ReaperConfig::default()
            .with_metadata_source(self.metadata_source)
            .with_interval(Duration::from_secs(self.interval_secs))
            .with_max_terminations_per_group(self.max_killed_pods)
            .with_run_once(self.run_once)
            .with_verbose(self.debug)
    }

    pub fn logger_config(&self) -> LoggerConfig {
        let mut cfg = LoggerConfig::for_verbosity(self.debug);
        cfg.format = self.log_format;
        cfg.tz = self.log_tz;
        if let Some(level) = &self.log_level {
            cfg.level = level.clone();
        }
        cfg
    }

    pub fn kube_config(&self) -> Result<KubeConfig, KubeError> {
        let cfg = match &self.api_server {
            Some(url) => KubeConfig::from_url(url.as_str()),
            None => KubeConfig::in_cluster()?,
        };
        Ok(cfg.with_timeout(Duration::from_secs(self.request_timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("reaper-agentd").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_build_reaper_config() {
        let args = parse(&[
            "--metadata-source",
            "annotations",
            "--interval-secs",
            "15",
            "--max-killed-pods",
            "2",
            "--run-once",
            "-v",
        ]);
        let cfg = args.reaper_config();

        assert_eq!(cfg.metadata_source, MetadataSource::Annotations);
        assert_eq!(cfg.interval, Duration::from_secs(15));
        assert_eq!(cfg.max_terminations_per_group, 2);
        assert!(cfg.run_once);
        assert!(cfg.verbose);
    }

    #[test]
    fn negative_cap_is_accepted() {
        let args = parse(&["--max-killed-pods", "-1"]);
        assert_eq!(args.reaper_config().max_terminations_per_group, -1);
        assert!(!args.reaper_config().termination_enabled());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Args::try_parse_from(["reaper-agentd", "--interval-secs", "0"]).is_err());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(Args::try_parse_from(["reaper-agentd", "--max-killed-pods", "five"]).is_err());
        assert!(Args::try_parse_from(["reaper-agentd", "--metadata-source", "env"]).is_err());
    }

    #[test]
    fn verbose_logger_raises_reaper_crates() {
        let quiet = parse(&["--api-server", "http://localhost:8001"]).logger_config();
        let loud = parse(&["--api-server", "http://localhost:8001", "--debug"]).logger_config();
        assert_eq!(quiet.level.as_str(), "info");
        assert!(loud.level.as_str().contains("reaper_core=debug"));
    }

    #[test]
    fn explicit_log_level_wins() {
        let cfg = parse(&["--debug", "--log-level", "warn", "--log-format", "json"]).logger_config();
        assert_eq!(cfg.level.as_str(), "warn");
        assert_eq!(cfg.format, LoggerFormat::Json);
    }

    #[test]
    fn api_server_selects_url_mode() {
        let cfg = parse(&["--api-server", "http://127.0.0.1:8001/"])
            .kube_config()
            .unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:8001");
        assert!(cfg.token.is_none());
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn request_timeout_reaches_kube_config() {
        let cfg = parse(&["--api-server", "http://localhost:8001", "--request-timeout-secs", "5"])
            .kube_config()
            .unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(
            Args::try_parse_from(["reaper-agentd", "--request-timeout-secs", "0"]).is_err()
        );
    }
}
