// Cosine similarity and top-N ranking over document vectors.

/// Cosine similarity between two vectors, in [-1.0, 1.0].
///
/// Mismatched lengths, empty inputs, and zero vectors all give 0.0 rather
/// than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f32::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Sort `(tag, score)` pairs best-first and keep at most `top_n`.
///
/// Ties keep their input order.
pub fn top_n(mut scored: Vec<(String, f32)>, top_n: usize) -> Vec<(String, f32)> {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_n);
    scored
}
