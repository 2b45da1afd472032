use thiserror::Error;

use crate::document::DocumentError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("encoder error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}
