use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("cluster unavailable: {0}")]
    Unavailable(String),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("not found: {0}")]
    NotFound(String),
}
