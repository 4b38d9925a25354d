//! Valuation configuration with builder pattern.
//!
//! [`ValuationConfig`] gathers the constants of a valuation run: the market
//! reference price, currency units, rounding, accepted input ranges and the
//! dataset columns left out of the regression. It uses the `bon` crate for
//! builder generation with validation at build time.
//!
//! # Example
//!
//! ```
//! use property_valuation::valuation::{Bounds, ValuationConfig};
//!
//! // All defaults
//! let config = ValuationConfig::builder().build().unwrap();
//! assert_eq!(config.reference_price, 583.3);
//!
//! // A different market and a narrower room range
//! let config = ValuationConfig::builder()
//!     .reference_price(412.0)
//!     .rooms(Bounds::new(2.0, 12.0))
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::data::schema;

/// Current market median price, in thousands of dollars.
pub const DEFAULT_REFERENCE_PRICE: f64 = 583.3;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} bounds must be finite with min <= max, got [{min}, {max}]")]
    InvalidBounds {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("target column name is empty")]
    EmptyTargetColumn,
}

// =============================================================================
// Bounds
// =============================================================================

/// Inclusive range of accepted values for a query input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in `[min, max]`. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

// =============================================================================
// ValuationConfig
// =============================================================================

/// Configuration for fitting a [`Valuator`](super::Valuator) and serving queries.
///
/// The input bounds reflect the plausible range of the historical table, not
/// physical limits.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct ValuationConfig {
    /// Market reference price in thousands of dollars. Default: 583.3.
    ///
    /// The scale factor applied to every estimate is this value divided by
    /// the median historical price.
    #[builder(default = DEFAULT_REFERENCE_PRICE)]
    pub reference_price: f64,

    /// Currency units per unit of the target column. Default: 1000.
    #[builder(default = 1000.0)]
    pub price_unit: f64,

    /// Dollar figures are rounded to the nearest multiple of this. Default: 1000.
    #[builder(default = 1000.0)]
    pub rounding_step: f64,

    /// Accepted average room count. Default: `[1, 20]`.
    #[builder(default = Bounds::new(1.0, 20.0))]
    pub rooms: Bounds,

    /// Accepted pupil-teacher ratio. Default: `[1, 196]`.
    #[builder(default = Bounds::new(1.0, 196.0))]
    pub pupil_teacher_ratio: Bounds,

    /// Columns excluded from the regression. Default: `INDUS`, `AGE`.
    #[builder(default = schema::DEFAULT_DROPPED_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>())]
    pub dropped_columns: Vec<String>,

    /// Name of the price column when loading from CSV. Default: `MEDV`.
    #[builder(into, default = schema::MEDIAN_VALUE.to_string())]
    pub target_column: String,
}

/// Custom finishing function that validates the config.
impl<S: valuation_config_builder::IsComplete> ValuationConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `reference_price`, `price_unit` or `rounding_step` not positive
    /// - bounds not finite or with `min > max`
    /// - empty `target_column`
    pub fn build(self) -> Result<ValuationConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl ValuationConfig {
    /// Validate the configuration.
    ///
    /// Called by the builder and again when a valuator is fitted, since a
    /// deserialized config never passes through the builder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("reference_price", self.reference_price),
            ("price_unit", self.price_unit),
            ("rounding_step", self.rounding_step),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        self.rooms.validate("rooms")?;
        self.pupil_teacher_ratio.validate("pupil_teacher_ratio")?;

        if self.target_column.trim().is_empty() {
            return Err(ConfigError::EmptyTargetColumn);
        }

        Ok(())
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

// =============================================================================
// Tests
// =============================================================================
