use crate::constants::SIMILARITY_EPSILON;

/// Cosine similarity over the shared prefix of `a` and `b`.
///
/// A zero norm product is replaced by a tiny epsilon, so zero vectors compare as `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let denom = norm_a * norm_b;
    let denom = if denom == 0.0 { SIMILARITY_EPSILON } else { denom };
    dot / denom
}

/// Linear calibration of a similarity in `[-1, 1]` to a score in `[0, 100]`.
pub fn to_score(similarity: f32) -> f32 {
    ((similarity + 1.0) * 50.0).clamp(0.0, 100.0)
}
