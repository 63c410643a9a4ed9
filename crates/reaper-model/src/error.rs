use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown metadata source: {0} (expected: labels|annotations)")]
    UnknownMetadataSource(String),

    #[error("unknown instance phase: {0}")]
    UnknownPhase(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
