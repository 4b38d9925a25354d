//! property-valuation: log-linear house price estimates with RMSE bands.
//!
//! A least-squares model is fitted once on a historical housing table
//! (log of the median value regressed on the table's attributes). Queries
//! then value a hypothetical property described by its room count,
//! pupil-teacher ratio and river adjacency, returning a point estimate and a
//! range rescaled to a current market.
//!
//! # Key Types
//!
//! - [`Valuator`] - fitted model, template row, RMSE and scale factor
//! - [`PropertyQuery`] / [`Valuation`] - query input and structured result
//! - [`ValuationConfig`] - reference price, rounding and input bounds
//! - [`HousingDataset`] - validated historical table, loadable from CSV
//!
//! # Example
//!
//! ```
//! use property_valuation::testing::synthetic_housing;
//! use property_valuation::{PropertyQuery, ValuationConfig, Valuator};
//!
//! let valuator = Valuator::fit(&synthetic_housing(250, 1), ValuationConfig::default())?;
//!
//! let query = PropertyQuery::builder()
//!     .rooms(7.0)
//!     .pupil_teacher_ratio(14.0)
//!     .next_to_river(true)
//!     .build();
//! let valuation = valuator.dollar_estimate(&query)?;
//! assert_eq!(valuation.confidence.level(), 95);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod data;
pub mod error;
pub mod model;
pub mod testing;
pub mod training;
pub mod utils;
pub mod valuation;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{DatasetError, FeatureIndices, HousingDataset, LoadError};
pub use error::Error;
pub use model::LinearModel;
pub use training::{FitError, OlsTrainer};
pub use valuation::{
    Bounds, Confidence, ConfigError, LogEstimate, PropertyQuery, Valuation, ValuationConfig,
    ValuationError, Valuator,
};
