use std::path::{Path, PathBuf};

use crate::text::normalize_text;

use super::DocumentReader;
use super::error::DocumentError;

/// A CV given either as a document path or as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvInput {
    Path(PathBuf),
    Text(String),
}

impl CvInput {
    /// Treats `raw` as a path when something exists there, else as literal text.
    pub fn infer(raw: &str) -> Self {
        if !raw.is_empty() && Path::new(raw).exists() {
            Self::Path(PathBuf::from(raw))
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// Reads (for paths) and normalizes the CV text.
    pub fn resolve_text(&self, reader: &dyn DocumentReader) -> Result<String, DocumentError> {
        match self {
            Self::Path(path) => Ok(normalize_text(&reader.read_any(path)?)),
            Self::Text(text) => Ok(normalize_text(text)),
        }
    }

    /// Candidate id used in rankings: the file stem, or `cv_{index}` for literal text.
    pub fn candidate_id(&self, index: usize) -> String {
        match self {
            Self::Path(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("cv_{index}")),
            Self::Text(_) => format!("cv_{index}"),
        }
    }
}

impl From<PathBuf> for CvInput {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for CvInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for CvInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
