//! Pure numeric routines shared by the embedding and lexical scorers.

/// Euclidean magnitude of a vector
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Returns exactly 0.0 when either magnitude is zero, so "no signal"
/// degrades to "no similarity" instead of propagating NaN through ranking.
/// Vectors of different lengths also yield 0.0: at the lexical call sites a
/// mismatched or empty vector means no overlap with the corpus, and the
/// embedding path filters out unmatched lookups before ever comparing.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
