use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::constants::MODEL_DESCRIPTOR_FILES;
use crate::embedding::error::EmbeddingError;

/// Files fetched from the hub for a pretrained encoder.
const PRETRAINED_FILES: [&str; 3] = ["config.json", "tokenizer.json", "model.safetensors"];

/// Where the encoder weights come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A persisted model directory (for example the `latest` training output).
    Local(PathBuf),
    /// A Hugging Face hub identifier.
    Pretrained(String),
}

impl ModelSource {
    /// Picks the local directory when it is a loadable model, else the pretrained id.
    ///
    /// Never fails: an unusable directory is logged and skipped.
    pub fn resolve(model_dir: Option<&Path>, encoder_name: &str) -> Self {
        if let Some(dir) = model_dir {
            if is_model_dir(dir) {
                debug!(dir = %dir.display(), "Resolved local encoder directory");
                return Self::Local(dir.to_path_buf());
            }
            warn!(
                dir = %dir.display(),
                fallback = encoder_name,
                "Model directory missing or has no descriptor file, using pretrained encoder"
            );
        }

        Self::Pretrained(encoder_name.to_string())
    }

    /// Returns a directory holding `config.json`, `tokenizer.json` and `model.safetensors`.
    ///
    /// Pretrained identifiers are downloaded into the hub cache on first use.
    pub fn materialize(&self) -> Result<PathBuf, EmbeddingError> {
        match self {
            Self::Local(dir) => Ok(dir.clone()),
            Self::Pretrained(name) => fetch_pretrained(name),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(dir) => write!(f, "{}", dir.display()),
            Self::Pretrained(name) => f.write_str(name),
        }
    }
}

/// Returns `true` if `path` is a directory containing at least one descriptor file.
pub fn is_model_dir(path: &Path) -> bool {
    path.is_dir()
        && MODEL_DESCRIPTOR_FILES
            .iter()
            .any(|name| path.join(name).is_file())
}

fn fetch_pretrained(name: &str) -> Result<PathBuf, EmbeddingError> {
    let fetch_err = |reason: String| EmbeddingError::FetchFailed {
        name: name.to_string(),
        reason,
    };

    let api = hf_hub::api::sync::Api::new().map_err(|e| fetch_err(e.to_string()))?;
    let repo = api.model(name.to_string());

    let mut dir = None;
    for file in PRETRAINED_FILES {
        let path = repo.get(file).map_err(|e| fetch_err(format!("{file}: {e}")))?;
        dir = path.parent().map(Path::to_path_buf);
    }

    let dir = dir.ok_or_else(|| fetch_err("hub cache returned no snapshot directory".into()))?;
    info!(encoder = name, dir = %dir.display(), "Pretrained encoder available");
    Ok(dir)
}
