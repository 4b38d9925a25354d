//! Ordinary least squares with an intercept.
//!
//! Solves
//!
//! ```text
//! minimize Σ (y_i - b - x_i^T β)^2
//! ```
//!
//! by centring every column and the target, solving the centred system with
//! an SVD least-squares solve, then recovering the intercept as
//! `b = ȳ - x̄^T β`. Rank-deficient designs get the minimum-norm solution.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use crate::model::LinearModel;

/// Errors that can occur while fitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("cannot fit a model on zero rows")]
    Empty,

    #[error("number of targets ({targets}) does not match number of rows ({rows})")]
    TargetLenMismatch { rows: usize, targets: usize },

    #[error("least-squares solve failed: {0}")]
    Solve(&'static str),

    #[error("least-squares solution is not finite")]
    NonFinite,
}

/// Least-squares trainer.
///
/// # Example
///
/// ```
/// use property_valuation::training::OlsTrainer;
/// use ndarray::array;
///
/// // y = 2 + 3x
/// let x = array![[0.0], [1.0], [2.0]];
/// let y = array![2.0, 5.0, 8.0];
///
/// let model = OlsTrainer::default().train(x.view(), y.view()).unwrap();
/// assert!((model.coefficient(0) - 3.0).abs() < 1e-10);
/// assert!((model.intercept() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OlsTrainer {
    /// Singular values below `rcond × σ_max` are treated as zero.
    ///
    /// `None` uses `ε × max(n_rows, n_features)`.
    pub rcond: Option<f64>,
}

impl OlsTrainer {
    /// Fit coefficients and intercept on `features` `[n_rows, n_features]`.
    pub fn train(
        &self,
        features: ArrayView2<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> Result<LinearModel, FitError> {
        let (n_rows, n_features) = features.dim();
        if n_rows == 0 {
            return Err(FitError::Empty);
        }
        if targets.len() != n_rows {
            return Err(FitError::TargetLenMismatch {
                rows: n_rows,
                targets: targets.len(),
            });
        }

        let x_mean = features.mean_axis(Axis(0)).ok_or(FitError::Empty)?;
        let y_mean = targets.mean().ok_or(FitError::Empty)?;

        if n_features == 0 {
            return Ok(LinearModel::new(Array1::zeros(0), y_mean));
        }

        let x = DMatrix::from_fn(n_rows, n_features, |i, j| features[[i, j]] - x_mean[j]);
        let y = DVector::from_iterator(n_rows, targets.iter().map(|v| v - y_mean));

        let svd = x.svd(true, true);
        let rcond = self
            .rcond
            .unwrap_or(f64::EPSILON * n_rows.max(n_features) as f64);
        let eps = rcond * svd.singular_values.max();
        let beta = svd.solve(&y, eps).map_err(FitError::Solve)?;

        if !beta.iter().all(|v| v.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let coefficients: Array1<f64> = beta.iter().copied().collect();
        let intercept = y_mean - x_mean.dot(&coefficients);
        if !intercept.is_finite() {
            return Err(FitError::NonFinite);
        }

        tracing::debug!(n_rows, n_features, intercept, "fitted least-squares model");
        Ok(LinearModel::new(coefficients, intercept))
    }
}
