//! Regression metrics.

use ndarray::ArrayView1;

// =============================================================================
// RMSE (Root Mean Squared Error)
// =============================================================================

/// Root Mean Squared Error: sqrt(mean((pred - label)²))
///
/// Lower is better. Returns 0.0 for empty input.
///
/// # Panics
///
/// Panics in debug builds if the two views differ in length.
pub fn rmse(predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(predictions.len(), targets.len());
    if predictions.is_empty() {
        return 0.0;
    }

    let mse = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, l)| {
            let diff = p - l;
            diff * diff
        })
        .sum::<f64>()
        / predictions.len() as f64;
    mse.sqrt()
}
