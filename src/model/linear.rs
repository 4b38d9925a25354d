//! Fitted linear model data structure and prediction.

use ndarray::{Array1, ArrayView1, ArrayView2};

/// Single-output linear model (coefficients + intercept).
///
/// ```text
/// output = intercept + Σ(feature[i] × coefficient[i])
/// ```
///
/// # Example
///
/// ```
/// use property_valuation::model::LinearModel;
/// use ndarray::array;
///
/// let model = LinearModel::new(array![0.5, 0.3], 0.1);
///
/// assert_eq!(model.n_features(), 2);
/// assert!((model.predict_row(&[2.0, 3.0]) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Create a model from per-feature coefficients and an intercept.
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Per-feature coefficients.
    #[inline]
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    /// Coefficient of a single feature.
    #[inline]
    pub fn coefficient(&self, feature: usize) -> f64 {
        debug_assert!(feature < self.n_features(), "feature index out of bounds");
        self.coefficients[feature]
    }

    /// Intercept term.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predict for a single row.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(
            features.len(),
            self.n_features(),
            "feature count mismatch: got {}, need {}",
            features.len(),
            self.n_features()
        );

        self.intercept
            + features
                .iter()
                .zip(self.coefficients.iter())
                .map(|(x, w)| x * w)
                .sum::<f64>()
    }

    /// Predict for a batch of rows `[n_rows, n_features]`.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        debug_assert_eq!(features.ncols(), self.n_features());
        features.dot(&self.coefficients) + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn make_simple_model() -> LinearModel {
        // y = 0.5*x0 + 0.3*x1 + 0.1
        LinearModel::new(array![0.5, 0.3], 0.1)
    }

    #[test]
    fn accessors() {
        let model = make_simple_model();
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.coefficient(0), 0.5);
        assert_eq!(model.coefficient(1), 0.3);
        assert_eq!(model.intercept(), 0.1);
    }

    #[test]
    fn predict_row() {
        let model = make_simple_model();
        // 0.5*1 + 0.3*2 + 0.1 = 1.2
        assert!((model.predict_row(&[1.0, 2.0]) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn predict_batch_matches_rows() {
        let model = make_simple_model();
        let data = array![
            [2.0, 3.0], // 2.0
            [1.0, 1.0], // 0.9
            [0.0, 0.0], // 0.1
        ];

        let preds = model.predict(data.view());

        assert_eq!(preds.len(), 3);
        for (row, &pred) in data.rows().into_iter().zip(preds.iter()) {
            let expected = model.predict_row(row.as_slice().unwrap());
            assert!((pred - expected).abs() < 1e-12);
        }
        assert!((preds[0] - 2.0).abs() < 1e-12);
        assert!((preds[1] - 0.9).abs() < 1e-12);
    }
}
