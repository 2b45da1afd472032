use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_ENCODER_NAME, ENCODER_MAX_SEQ_LEN, STUB_EMBEDDING_DIM,
};
use crate::embedding::device::DevicePreference;
use crate::embedding::error::EmbeddingError;

use super::source::ModelSource;

/// Configuration for [`TextEncoder`](super::TextEncoder).
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Preferred local model directory; ignored when it is not a model directory.
    pub model_dir: Option<PathBuf>,
    /// Pretrained hub identifier used as fallback.
    pub encoder_name: String,
    /// Compute device preference.
    pub device: DevicePreference,
    /// Default batch size for callers that do not pass one.
    pub batch_size: usize,
    /// Max tokens per text.
    pub max_seq_len: usize,
    /// Output dimension of the stub backend.
    pub stub_dim: usize,
    /// If true, use the lexical stub backend (no model files required).
    pub stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            encoder_name: DEFAULT_ENCODER_NAME.to_string(),
            device: DevicePreference::Cpu,
            batch_size: DEFAULT_BATCH_SIZE,
            max_seq_len: ENCODER_MAX_SEQ_LEN,
            stub_dim: STUB_EMBEDDING_DIM,
            stub: false,
        }
    }
}

impl EncoderConfig {
    /// Creates a config that prefers `model_dir` and falls back to the default pretrained id.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (deterministic lexical vectors, no model files).
    pub fn stub() -> Self {
        Self {
            stub: true,
            ..Default::default()
        }
    }

    /// Resolves the model source. Never fails.
    pub fn source(&self) -> ModelSource {
        ModelSource::resolve(self.model_dir.as_deref(), &self.encoder_name)
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be at least 1".to_string(),
            });
        }

        if self.stub && self.stub_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "stub_dim must be at least 1".to_string(),
            });
        }

        if !self.stub && self.encoder_name.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "encoder_name is required (stubbing is disabled)".to_string(),
            });
        }

        Ok(())
    }
}
