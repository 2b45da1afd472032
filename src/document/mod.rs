//! CV documents: text extraction, input resolution and directory discovery.

/// CV directory discovery.
pub mod discovery;
/// DOCX paragraph extraction.
pub mod docx;
mod error;
/// Path-or-text CV inputs.
pub mod input;
/// PDF page extraction.
pub mod pdf;


pub use discovery::{CV_PATTERNS, discover_cv_files};
pub use error::DocumentError;
pub use input::CvInput;

use std::path::Path;

use tracing::debug;

/// Turns a document on disk into raw text.
pub trait DocumentReader: Send + Sync {
    fn read_any(&self, path: &Path) -> Result<String, DocumentError>;
}

/// Dispatches on the lowercase extension: `.pdf`, `.doc`/`.docx`, anything else as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentReader;

impl DocumentReader for FsDocumentReader {
    fn read_any(&self, path: &Path) -> Result<String, DocumentError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        debug!(path = %path.display(), ext = %ext, "Reading document");

        match ext.as_str() {
            "pdf" => pdf::read_pdf_text(path),
            "doc" | "docx" => docx::read_docx_text(path),
            _ => std::fs::read_to_string(path).map_err(|e| DocumentError::io(path, e)),
        }
    }
}
