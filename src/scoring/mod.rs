//! Local scoring: similarity, calibration, ranking and the [`LocalScoringService`].
//!
//! Every operation produces [`ScoreRecord`]s with the same shape. Rankings are stable:
//! equal scores keep input order, and `top_k` below one is treated as one.

pub mod error;
pub mod ranking;
pub mod service;
pub mod similarity;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use ranking::{Ranked, clamp_top_k, rank_top_k};
pub use service::LocalScoringService;
pub use similarity::{cosine_similarity, to_score};
pub use types::{DirectoryRanking, HybridScore, ScoreRecord, ScoringMethod};
