use std::cmp::Ordering;

use super::types::{HybridScore, ScoreRecord};

/// Anything that ranks by a `[0, 100]` score.
pub trait Ranked {
    fn rank_score(&self) -> f32;
}

impl Ranked for ScoreRecord {
    fn rank_score(&self) -> f32 {
        self.score
    }
}

impl Ranked for HybridScore {
    fn rank_score(&self) -> f32 {
        self.score
    }
}

/// Coerces a caller-supplied `top_k` to at least one.
pub fn clamp_top_k(top_k: i64) -> usize {
    usize::try_from(top_k.max(1)).unwrap_or(usize::MAX)
}

/// Stable sort by score descending (ties keep input order), then keep `max(1, top_k)`.
pub fn rank_top_k<T: Ranked>(mut items: Vec<T>, top_k: i64) -> Vec<T> {
    items.sort_by(|a, b| {
        b.rank_score()
            .partial_cmp(&a.rank_score())
            .unwrap_or(Ordering::Equal)
    });
    items.truncate(clamp_top_k(top_k));
    items
}
