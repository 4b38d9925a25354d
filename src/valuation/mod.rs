//! Property valuation on top of a fitted log-price regression.
//!
//! # Overview
//!
//! - [`Valuator`]: fitted once, then answers queries through `&self`
//! - [`PropertyQuery`]: room count, pupil-teacher ratio, river adjacency, band width
//! - [`LogEstimate`] / [`Valuation`]: log-space and rescaled dollar results
//! - [`ValuationConfig`]: reference price, units, rounding and input bounds
//!
//! A query is answered in four steps:
//!
//! ```text
//! row       = template with RM, PTRATIO and CHAS overwritten
//! log_price = intercept + row · coefficients
//! band      = log_price ± k × rmse          (k = 2 for 95%, 1 for 68%)
//! dollars   = round(e^value × price_unit × reference / median, step)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use property_valuation::valuation::{PropertyQuery, ValuationConfig, Valuator};
//!
//! let valuator = Valuator::from_csv_path("boston_house_prices.csv", ValuationConfig::default())?;
//! let valuation = valuator.dollar_estimate(&PropertyQuery::new(6.0, 15.0))?;
//! println!("{valuation}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod estimator;
mod report;
mod template;
mod valuator;

pub use config::{Bounds, ConfigError, ValuationConfig, DEFAULT_REFERENCE_PRICE};
pub use estimator::{Confidence, LogEstimate};
pub use report::Dollars;
pub use template::TemplateRow;
pub use valuator::{PropertyQuery, Valuation, ValuationError, Valuator};
