//! L2 norm evaluation for dense vectors.
//!
//! One norm definition is used throughout the crate, for both the reference
//! norm `||b||` and every residual norm, so that ratios of the two are
//! meaningful.

use crate::error::ValidationError;

/// L2 (Euclidean) norm of a vector.
#[inline]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// L2 norm of the elementwise difference `u - v`.
///
/// # Errors
///
/// Returns [`ValidationError::DimensionMismatch`] if the lengths differ.
pub fn diff_norm(u: &[f64], v: &[f64]) -> Result<f64, ValidationError> {
    if u.len() != v.len() {
        return Err(ValidationError::DimensionMismatch(format!(
            "diff_norm: vector lengths {} and {} differ",
            u.len(),
            v.len(),
        )));
    }
    Ok(u.iter()
        .zip(v.iter())
        .map(|(&a, &b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt())
}
