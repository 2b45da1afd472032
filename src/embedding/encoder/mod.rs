//! Sentence encoder (BERT-family safetensors checkpoint + tokenizer).
//!
//! Use [`EncoderConfig::stub`] for tests and offline runs without model files.

/// Encoder configuration.
pub mod config;
/// Model source resolution.
pub mod source;


pub use config::EncoderConfig;
pub use source::{ModelSource, is_model_dir};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::model::SentenceModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::hashing::LexicalHasher;
use crate::embedding::utils::load_tokenizer_with_truncation;

enum EncoderBackend {
    Model {
        model: Arc<SentenceModel>,
        tokenizer: Arc<Tokenizer>,
        device: Device,
        dir: PathBuf,
    },
    Stub {
        hasher: LexicalHasher,
    },
}

/// Turns texts into fixed-length vectors.
///
/// Read-only after construction; share it behind an `Arc`.
pub struct TextEncoder {
    backend: EncoderBackend,
    name: String,
    config: EncoderConfig,
}

impl std::fmt::Debug for TextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub { .. } => "Stub".to_string(),
                },
            )
            .field("name", &self.name)
            .field("dimension", &self.dimension())
            .finish()
    }
}

impl TextEncoder {
    /// Loads the encoder. Source resolution never fails; loading the resolved source may.
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.stub {
            warn!("Encoder running in STUB mode (lexical hashing)");
            return Ok(Self {
                backend: EncoderBackend::Stub {
                    hasher: LexicalHasher::new(config.stub_dim),
                },
                name: format!("lexical-stub-{}", config.stub_dim),
                config,
            });
        }

        let source = config.source();
        let dir = source.materialize()?;
        let device = select_device(config.device);
        debug!(?device, "Selected compute device for encoder");

        let (model, tokenizer) = Self::load_model(&dir, &device, config.max_seq_len)?;

        info!(
            source = %source,
            dir = %dir.display(),
            model_type = %model.kind(),
            hidden_size = model.hidden_size(),
            max_seq_len = config.max_seq_len,
            "Encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
                dir,
            },
            name: source.to_string(),
            config,
        })
    }

    /// Shorthand for a stub encoder with the default dimension.
    pub fn stub() -> Self {
        let config = EncoderConfig::stub();
        Self {
            backend: EncoderBackend::Stub {
                hasher: LexicalHasher::new(config.stub_dim),
            },
            name: format!("lexical-stub-{}", config.stub_dim),
            config,
        }
    }

    fn load_model(
        dir: &Path,
        device: &Device,
        max_seq_len: usize,
    ) -> Result<(SentenceModel, Tokenizer), EmbeddingError> {
        let weights = dir.join("model.safetensors");
        if !weights.is_file() {
            return Err(EmbeddingError::ModelNotFound { path: weights });
        }

        let tokenizer = load_tokenizer_with_truncation(dir, max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let model =
            SentenceModel::load(dir, device).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load encoder from {}: {}", dir.display(), e),
            })?;

        Ok((model, tokenizer))
    }

    /// Encodes texts, one vector per input in input order.
    ///
    /// `batch_size` only controls chunking (0 is treated as 1); output does not depend on it.
    pub fn encode(
        &self,
        texts: &[&str],
        batch_size: usize,
        normalize: bool,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let batch_size = batch_size.max(1);
        let mut out = Vec::with_capacity(texts.len());

        for (batch_idx, chunk) in texts.chunks(batch_size).enumerate() {
            debug!(
                batch = batch_idx,
                batch_len = chunk.len(),
                "Encoding batch"
            );
            // Texts are run one at a time so padding never enters the pooled output.
            for text in chunk {
                let mut vec = self.encode_raw(text)?;
                if normalize {
                    l2_normalize(&mut vec);
                }
                out.push(vec);
            }
        }

        Ok(out)
    }

    /// Encodes a single text with the configured batch size.
    pub fn encode_one(&self, text: &str, normalize: bool) -> Result<Vec<f32>, EmbeddingError> {
        self.encode(&[text], self.config.batch_size, normalize)?
            .pop()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "encoder returned no vector".to_string(),
            })
    }

    fn encode_raw(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
                ..
            } => Self::encode_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub { hasher } => Ok(hasher.encode(text)),
        }
    }

    fn encode_with_model(
        text: &str,
        model: &SentenceModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(vec![0.0; model.hidden_size()]);
        }

        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = model
            .forward(&input_ids, &type_ids, &mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        Ok(pooled.squeeze(0)?.to_vec1::<f32>()?)
    }

    /// Persists the model so `target` is itself a resolvable model directory.
    ///
    /// The whole source tree is copied, sub-module folders such as `1_Pooling/` included.
    pub fn save(&self, target: &Path) -> Result<(), EmbeddingError> {
        let EncoderBackend::Model { dir, .. } = &self.backend else {
            return Err(EmbeddingError::NothingToSave);
        };

        let save_err = |reason: String| EmbeddingError::SaveFailed {
            path: target.to_path_buf(),
            reason,
        };

        std::fs::create_dir_all(target).map_err(|e| save_err(e.to_string()))?;

        let same_dir = match (dir.canonicalize(), target.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if same_dir {
            debug!(dir = %dir.display(), "Save target is the loaded directory");
            return Ok(());
        }

        let copied = copy_tree(dir, target).map_err(|e| save_err(e.to_string()))?;

        info!(target = %target.display(), files = copied, "Encoder saved");
        Ok(())
    }

    /// Source name reported in score metadata.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output vector length.
    pub fn dimension(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.hidden_size(),
            EncoderBackend::Stub { hasher } => hasher.dimensions(),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub { .. })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

fn l2_normalize(vec: &mut [f32]) {
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vec.iter_mut() {
            *x /= norm;
        }
    }
}

/// Copies every file under `src` into `dst`, recreating sub-directories. Returns the file count.
///
/// `dst` itself is skipped when it lives inside `src`.
fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(dst)?;
    let skip = dst.canonicalize()?;
    let mut copied = 0usize;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        if from.canonicalize().is_ok_and(|p| p == skip) {
            continue;
        }

        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            std::fs::copy(&from, &to)?;
            copied += 1;
        }
    }

    Ok(copied)
}
