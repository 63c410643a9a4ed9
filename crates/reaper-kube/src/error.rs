use std::path::PathBuf;

use reaper_core::ClusterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KubeError {
    #[error("kubernetes config error: {0}")]
    Config(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<KubeError> for ClusterError {
    fn from(e: KubeError) -> Self {
        match e {
            KubeError::Status { status: 404, message } => ClusterError::NotFound(message),
            KubeError::Status { status, message } => ClusterError::Api { status, message },
            KubeError::Decode(msg) => ClusterError::Decode(msg),
            KubeError::Http(e) if e.is_decode() => ClusterError::Decode(e.to_string()),
            other => ClusterError::Unavailable(other.to_string()),
        }
    }
}
