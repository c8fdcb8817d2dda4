//! Vector similarity and dimension checking
//!
//! Every scorer in the pipeline ranks by cosine similarity, so it lives here
//! once, accumulated in `f64` to keep long dot products stable.

use crate::error::{EmbedError, Result};

/// Cosine similarity between two vectors of equal dimension.
///
/// Returns 0.0 when either vector has zero norm, so padding and absent
/// embeddings never poison a ranking. The slices must have equal length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "cosine over mismatched dimensions");

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = f64::from(x);
        let y = f64::from(y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Check a produced dimension against the provider's advertised one.
pub fn check_dimension(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EmbedError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
