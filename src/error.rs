//! Crate-level error for building a [`Valuator`](crate::valuation::Valuator).
//!
//! Query-time failures use [`ValuationError`](crate::valuation::ValuationError)
//! instead; once a valuator exists, bad inputs are the only thing that can go
//! wrong.

use crate::data::{DatasetError, LoadError};
use crate::training::FitError;
use crate::valuation::ConfigError;

/// Errors that can occur while loading data and fitting a valuator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load dataset: {0}")]
    Load(#[from] LoadError),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("failed to fit model: {0}")]
    Fit(#[from] FitError),
}
