use std::path::Path;

use super::error::DocumentError;

/// Extracts text page by page and joins pages with `\n`.
pub fn read_pdf_text(path: &Path) -> Result<String, DocumentError> {
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| DocumentError::Pdf {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(pages.join("\n"))
}
