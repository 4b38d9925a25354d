//! Model fitting.
//!
//! - [`OlsTrainer`]: closed-form least squares with an intercept
//! - [`rmse`]: in-sample error of a fitted model

mod metrics;
mod ols;

pub use metrics::rmse;
pub use ols::{FitError, OlsTrainer};
