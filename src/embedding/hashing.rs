//! Lexical feature-hashing encoder backing the stub mode.
//!
//! Terms are hashed into a fixed number of buckets and weighted by frequency. The result
//! is not semantic, but shared vocabulary yields positive cosine similarity, which is all
//! offline runs and tests need.

use std::collections::BTreeMap;

/// Deterministic bag-of-terms encoder.
#[derive(Debug, Clone, Copy)]
pub struct LexicalHasher {
    dimensions: usize,
}

impl LexicalHasher {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// FNV-1a bucket for a term.
    fn bucket(&self, term: &str) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % self.dimensions as u64) as usize
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
    }

    /// Encodes one text. Output is unnormalized; an empty text yields the zero vector.
    pub fn encode(&self, text: &str) -> Vec<f32> {
        // Ordered map keeps float accumulation order independent of hasher seeds.
        let mut counts: BTreeMap<String, f32> = BTreeMap::new();
        for term in Self::terms(text) {
            *counts.entry(term).or_default() += 1.0;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        let total: f32 = counts.values().sum();
        if total == 0.0 {
            return vec;
        }

        for (term, count) in &counts {
            let weight = 1.0 + (term.chars().count() as f32).ln();
            vec[self.bucket(term)] += (count / total) * weight;
        }

        vec
    }
}
