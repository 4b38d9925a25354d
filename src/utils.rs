//! Common utilities used across the crate.

// =============================================================================
// Statistical Utilities
// =============================================================================

/// Median of a slice of finite values.
///
/// For an even number of values this is the mean of the two middle values.
/// Returns `None` if `values` is empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Round `value` to the nearest multiple of `step`.
///
/// Halfway cases round away from zero, so `412_500` with a step of `1000`
/// becomes `413_000`.
#[inline]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    debug_assert!(step > 0.0, "rounding step must be positive");
    (value / step).round() * step
}
