use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::DocumentError;

/// CV file patterns, in discovery order.
pub const CV_PATTERNS: [&str; 3] = ["*.pdf", "*.docx", "*.txt"];

/// Lists CV files directly inside `dir`: PDFs, then DOCX, then plain text.
///
/// Non-recursive. A missing directory yields an empty list.
pub fn discover_cv_files(dir: &Path) -> Result<Vec<PathBuf>, DocumentError> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();

    for pattern in CV_PATTERNS {
        let full = format!("{base}/{pattern}");
        let paths = glob::glob(&full).map_err(|e| DocumentError::Pattern {
            dir: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        // Unreadable entries are skipped the same way a plain directory listing would.
        files.extend(paths.filter_map(Result::ok).filter(|p| p.is_file()));
    }

    debug!(dir = %dir.display(), count = files.len(), "Discovered CV files");
    Ok(files)
}
