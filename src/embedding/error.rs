use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("encoder weights not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load encoder: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("failed to fetch pretrained encoder '{name}': {reason}")]
    FetchFailed { name: String, reason: String },

    #[error("unknown device '{value}': expected cpu, cuda or metal")]
    UnknownDevice { value: String },

    #[error("encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid encoder configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("stub encoder has no weights to save")]
    NothingToSave,

    #[error("failed to save encoder to {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
