//! Vector math for cosine retrieval: normalization, dot product, ranking.

use smartbot_types::error::ModelError;

/// Scale `vector` to unit L2 norm.
///
/// A zero-norm or non-finite vector has no direction, so it cannot take part
/// in cosine comparison and is rejected as an inference failure.
pub fn l2_normalize(mut vector: Vec<f32>) -> Result<Vec<f32>, ModelError> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if !norm.is_finite() || norm == 0.0 {
        return Err(ModelError::inference(format!(
            "cannot normalize embedding with norm {norm}"
        )));
    }
    for x in &mut vector {
        *x /= norm;
    }
    Ok(vector)
}

/// Dot product of two equal-length vectors.
///
/// For unit vectors this is their cosine similarity.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Indices of the `k` highest scores, best first.
///
/// `k` is clamped to `scores.len()`. Equal scores keep ascending index order.
pub fn rank_top_k(scores: &[f32], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // sort_by is stable: ties stay in index order
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(k.min(scores.len()));
    order
}
