use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a CV document into text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract PDF text from {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },

    #[error("failed to extract DOCX text from {path}: {reason}")]
    Docx { path: PathBuf, reason: String },

    #[error("invalid CV search pattern for {dir}: {reason}")]
    Pattern { dir: PathBuf, reason: String },
}

impl DocumentError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
