use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::KubeError;

/// Mount point of the pod's service account credentials.
pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
const ENV_SERVICE_PORT: &str = "KUBERNETES_SERVICE_PORT";

/// How to reach the API server.
#[derive(Clone)]
pub struct KubeConfig {
    /// Scheme, host and port, without a trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Extra PEM root certificate for the API server.
    pub ca_pem: Option<Vec<u8>>,
    pub timeout: Duration,
}

impl std::fmt::Debug for KubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("ca_pem", &self.ca_pem.as_ref().map(Vec::len))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl KubeConfig {
    /// Target a plain URL without credentials, e.g. `kubectl proxy` on `http://127.0.0.1:8001`.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            token: None,
            ca_pem: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration of a process running inside a pod.
    ///
    /// Reads the service host and port from the environment, and the token and CA bundle from
    /// [`SERVICE_ACCOUNT_DIR`].
    pub fn in_cluster() -> Result<Self, KubeError> {
        let host = std::env::var(ENV_SERVICE_HOST)
            .map_err(|_| KubeError::Config(format!("{ENV_SERVICE_HOST} is not set")))?;
        let port = std::env::var(ENV_SERVICE_PORT).unwrap_or_else(|_| "443".to_string());
        Self::in_cluster_from(&host, &port, Path::new(SERVICE_ACCOUNT_DIR))
    }

    pub(crate) fn in_cluster_from(host: &str, port: &str, dir: &Path) -> Result<Self, KubeError> {
        if host.is_empty() {
            return Err(KubeError::Config(format!("{ENV_SERVICE_HOST} is empty")));
        }
        let host = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        let token = read(&dir.join("token"))?;
        let token = String::from_utf8(token)
            .map_err(|_| KubeError::Config("service account token is not utf-8".into()))?;
        let ca_pem = read(&dir.join("ca.crt"))?;

        Ok(Self {
            base_url: format!("https://{host}:{port}"),
            token: Some(token.trim().to_string()),
            ca_pem: Some(ca_pem),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

fn read(path: &Path) -> Result<Vec<u8>, KubeError> {
    fs::read(path).map_err(|source| KubeError::Io {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_account_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("reaper-kube-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("token"), "secret-token\n").unwrap();
        fs::write(dir.join("ca.crt"), "-----BEGIN CERTIFICATE-----\n").unwrap();
        dir
    }

    #[test]
    fn from_url_trims_trailing_slash() {
        let cfg = KubeConfig::from_url("http://127.0.0.1:8001/");
        assert_eq!(cfg.base_url, "http://127.0.0.1:8001");
        assert!(cfg.token.is_none());
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn in_cluster_reads_service_account() {
        let dir = service_account_dir("ok");
        let cfg = KubeConfig::in_cluster_from("10.0.0.1", "443", &dir).unwrap();

        assert_eq!(cfg.base_url, "https://10.0.0.1:443");
        assert_eq!(cfg.token.as_deref(), Some("secret-token"));
        assert!(cfg.ca_pem.is_some());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn in_cluster_brackets_ipv6_hosts() {
        let dir = service_account_dir("v6");
        let cfg = KubeConfig::in_cluster_from("fd00::1", "6443", &dir).unwrap();
        assert_eq!(cfg.base_url, "https://[fd00::1]:6443");
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_token_is_an_io_error() {
        let dir = std::env::temp_dir().join("reaper-kube-does-not-exist");
        let err = KubeConfig::in_cluster_from("10.0.0.1", "443", &dir).unwrap_err();
        assert!(matches!(err, KubeError::Io { .. }));
    }

    #[test]
    fn debug_hides_token() {
        let cfg = KubeConfig::from_url("http://localhost").with_token("hunter2");
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }
}
