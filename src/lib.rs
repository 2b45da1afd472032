//! cvmatch library crate (used by the CLI binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment-driven configuration
//! - [`CvInput`], [`OfferInput`], [`OfferRecord`] - Scoring inputs
//! - [`ScoreRecord`], [`HybridScore`], [`DirectoryRanking`] - Scoring outputs
//!
//! ## Scoring
//! - [`LocalScoringService`] - Embedding similarity scoring and ranking
//! - [`LlmScorer`], [`RemoteScorer`] - Remote LLM scoring with retries
//! - [`HybridOrchestrator`] - Local first, remote override
//!
//! ## Embedding
//! - [`TextEncoder`], [`EncoderConfig`] - Sentence encoder (BERT or lexical stub)
//!
//! ## Documents
//! - [`DocumentReader`], [`FsDocumentReader`] - PDF/DOCX/text extraction
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod document;
pub mod embedding;
pub mod hybrid;
pub mod remote;
pub mod scoring;
pub mod text;

pub use config::{Config, ConfigError};
pub use document::{CvInput, DocumentError, DocumentReader, FsDocumentReader, discover_cv_files};
pub use embedding::{DevicePreference, EmbeddingError, EncoderConfig, ModelSource, TextEncoder};
#[cfg(any(test, feature = "mock"))]
pub use hybrid::FixedRandom;
pub use hybrid::{HybridOrchestrator, HybridStats, RandomSource, ThreadRandom};
#[cfg(any(test, feature = "mock"))]
pub use remote::{MockChatBackend, MockReply};
pub use remote::{ChatBackend, LlmScorer, RemoteConfig, RemoteError, RemoteScorer, RetryPolicy};
pub use scoring::{
    DirectoryRanking, HybridScore, LocalScoringService, ScoreRecord, ScoringError, ScoringMethod,
    cosine_similarity, to_score,
};
pub use text::{OfferInput, OfferRecord, normalize_text};
