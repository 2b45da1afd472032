use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Uniform result of a local scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Calibrated score in `[0, 100]`.
    pub score: f32,
    /// Cosine similarity in `[-1, 1]`; only set for locally computed scores.
    pub similarity: Option<f32>,
    /// Offer id or candidate id, depending on the operation.
    pub identifier: Option<String>,
    /// Provenance (`encoder`).
    pub metadata: Map<String, Value>,
}

/// Which provider produced the final hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    Local,
    Remote,
}

impl ScoringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Local => "local",
            ScoringMethod::Remote => "remote",
        }
    }
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a hybrid scoring call: the local estimate plus an optional remote override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridScore {
    /// Final score: the remote score when one was obtained, else the local score.
    pub score: f32,
    /// Local cosine similarity.
    pub similarity: Option<f32>,
    pub local_score: f32,
    pub remote_score: Option<u8>,
    pub method: ScoringMethod,
    pub identifier: Option<String>,
    /// `method` and the nested `local` metadata.
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of ranking the CV files of a directory.
pub enum DirectoryRanking<T = ScoreRecord> {
    /// The directory held no CV files.
    NoCandidates {
        /// Directory that was searched.
        dir: PathBuf,
    },
    /// Ranked candidates (top-k).
    Ranked(Vec<T>),
}

impl<T> DirectoryRanking<T> {
    /// Returns `true` if nothing was ranked because no CV was found.
    pub fn is_empty_dir(&self) -> bool {
        matches!(self, DirectoryRanking::NoCandidates { .. })
    }

    /// Returns the ranked records, if any.
    pub fn records(&self) -> Option<&[T]> {
        match self {
            DirectoryRanking::Ranked(records) => Some(records),
            DirectoryRanking::NoCandidates { .. } => None,
        }
    }
}

impl<T> std::fmt::Display for DirectoryRanking<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryRanking::NoCandidates { dir } => {
                write!(f, "No CV found in {}", dir.display())
            }
            DirectoryRanking::Ranked(records) => write!(f, "RANKED ({} candidates)", records.len()),
        }
    }
}
