//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use cvmatch::OfferInput;
use serde_json::json;
use tempfile::TempDir;

pub const PYTHON_CV: &str = "Python developer, 3 years, machine learning, PyTorch";

pub const ACCOUNTANT_CV: &str = "Chartered accountant, audit, excel, financial reporting";

pub fn python_offer() -> OfferInput {
    serde_json::from_value(json!({
        "id": 1,
        "title": "Senior Python Developer",
        "keywords": ["python", "machine learning"],
    }))
    .expect("valid offer")
}

pub fn accountant_offer() -> OfferInput {
    serde_json::from_value(json!({
        "id": 2,
        "title": "Senior Accountant",
        "keywords": ["excel", "audit"],
    }))
    .expect("valid offer")
}

/// Temporary directory populated with CV files.
pub struct CvDir {
    dir: TempDir,
}

impl CvDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn text(self, name: &str, content: &str) -> Self {
        std::fs::write(self.dir.path().join(name), content).expect("write CV");
        self
    }

    /// Writes a minimal DOCX whose body holds one paragraph per entry.
    pub fn docx(self, name: &str, paragraphs: &[&str]) -> Self {
        write_docx(&self.dir.path().join(name), paragraphs);
        self
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let file = std::fs::File::create(path).expect("create docx");
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .expect("start docx part");
    zip.write_all(xml.as_bytes()).expect("write docx part");
    zip.finish().expect("finish docx");
}
