//! Fitted valuator and the dollar-estimate entry point.

use std::path::Path;

use bon::Builder;
use ndarray::ArrayView1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{DatasetError, FeatureIndices, HousingDataset};
use crate::error::Error;
use crate::model::LinearModel;
use crate::training::{rmse, FitError, OlsTrainer};
use crate::utils::{median, round_to_step};

use super::config::ValuationConfig;
use super::estimator::{Confidence, LogEstimate};
use super::template::TemplateRow;

// =============================================================================
// Query / Result types
// =============================================================================

/// Attributes of the hypothetical property to value.
///
/// # Example
///
/// ```
/// use property_valuation::valuation::{Confidence, PropertyQuery};
///
/// let query = PropertyQuery::builder()
///     .rooms(6.0)
///     .pupil_teacher_ratio(15.0)
///     .next_to_river(true)
///     .confidence(Confidence::Standard)
///     .build();
///
/// // River adjacency defaults to false and confidence to 95%.
/// let plain = PropertyQuery::new(6.0, 15.0);
/// assert!(!plain.next_to_river);
/// assert_eq!(plain.confidence, Confidence::High);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
pub struct PropertyQuery {
    /// Average number of rooms.
    pub rooms: f64,
    /// Students per teacher in the nearest school.
    pub pupil_teacher_ratio: f64,
    /// Whether the property bounds the river.
    #[builder(default)]
    #[serde(default)]
    pub next_to_river: bool,
    /// Band width of the returned range.
    #[builder(default)]
    #[serde(default)]
    pub confidence: Confidence,
}

impl PropertyQuery {
    /// Query with default river adjacency (`false`) and confidence (95%).
    pub fn new(rooms: f64, pupil_teacher_ratio: f64) -> Self {
        Self::builder()
            .rooms(rooms)
            .pupil_teacher_ratio(pupil_teacher_ratio)
            .build()
    }
}

/// Rescaled, rounded price estimate in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence: Confidence,
}

/// Rejected queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("room count {value} is outside the plausible range [{min}, {max}]")]
    RoomsOutOfRange { value: f64, min: f64, max: f64 },

    #[error("pupil-teacher ratio {value} is outside the plausible range [{min}, {max}]")]
    PupilTeacherRatioOutOfRange { value: f64, min: f64, max: f64 },

    #[error("feature row has {got} values, model expects {expected}")]
    RowLength { expected: usize, got: usize },
}

// =============================================================================
// Valuator
// =============================================================================

/// A log-price regression fitted once on a historical table, ready to value
/// hypothetical properties.
///
/// All state is fixed at construction; queries take `&self` and build their
/// own feature row, so a `Valuator` can be shared freely between threads.
///
/// # Example
///
/// ```
/// use property_valuation::testing::synthetic_housing;
/// use property_valuation::valuation::{PropertyQuery, ValuationConfig, Valuator};
///
/// let dataset = synthetic_housing(200, 7);
/// let valuator = Valuator::fit(&dataset, ValuationConfig::default()).unwrap();
///
/// let valuation = valuator.dollar_estimate(&PropertyQuery::new(6.0, 15.0)).unwrap();
/// assert!(valuation.lower <= valuation.estimate);
/// assert!(valuation.estimate <= valuation.upper);
/// ```
#[derive(Debug, Clone)]
pub struct Valuator {
    model: LinearModel,
    feature_names: Vec<String>,
    indices: FeatureIndices,
    template: TemplateRow,
    rmse: f64,
    scale_factor: f64,
    config: ValuationConfig,
}

impl Valuator {
    /// Fit on an in-memory dataset.
    ///
    /// Drops the configured columns, regresses the log of the target on the
    /// rest, and records the in-sample RMSE, the template row and the market
    /// scale factor.
    pub fn fit(dataset: &HousingDataset, config: ValuationConfig) -> Result<Self, Error> {
        config.validate()?;

        let reduced = dataset.drop_columns(&config.dropped_columns)?;
        let indices = FeatureIndices::resolve(reduced.feature_names())
            .map_err(|name| DatasetError::MissingColumn(name.to_string()))?;

        let log_targets = reduced.log_targets();
        let model = OlsTrainer::default().train(reduced.features(), log_targets.view())?;

        let fitted = model.predict(reduced.features());
        let rmse = rmse(fitted.view(), log_targets.view());

        let template = TemplateRow::from_features(reduced.features()).ok_or(FitError::Empty)?;
        let median_price = median(&reduced.targets().to_vec()).ok_or(FitError::Empty)?;
        let scale_factor = config.reference_price / median_price;

        tracing::info!(
            rows = reduced.n_rows(),
            features = reduced.n_features(),
            rmse,
            median_price,
            scale_factor,
            "fitted valuation model"
        );

        Ok(Self {
            model,
            feature_names: reduced.feature_names().to_vec(),
            indices,
            template,
            rmse,
            scale_factor,
            config,
        })
    }

    /// Load the table from a CSV file and fit on it.
    ///
    /// Fails fast if the file cannot be read: without the table there is no
    /// model and no template row.
    pub fn from_csv_path(path: impl AsRef<Path>, config: ValuationConfig) -> Result<Self, Error> {
        let dataset = HousingDataset::from_csv_path(path, &config.target_column)?;
        Self::fit(&dataset, config)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The fitted log-price model.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Names of the regression features, in model order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// `(feature name, coefficient)` pairs in model order.
    pub fn coefficients(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.model.coefficients().into_iter().copied())
    }

    /// Coefficient of a named feature.
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        crate::data::schema::position(&self.feature_names, name).map(|i| self.model.coefficient(i))
    }

    pub fn intercept(&self) -> f64 {
        self.model.intercept()
    }

    /// In-sample RMSE of the log-price fit.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Reference price over median historical price.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Baseline feature row (column means).
    pub fn template(&self) -> &TemplateRow {
        &self.template
    }

    pub fn feature_indices(&self) -> &FeatureIndices {
        &self.indices
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    // =========================================================================
    // Estimation
    // =========================================================================

    /// Log-price estimate and band for a query.
    ///
    /// Inputs are validated before any model computation.
    pub fn log_estimate(&self, query: &PropertyQuery) -> Result<LogEstimate, ValuationError> {
        self.validate(query)?;
        let row = self.template.query(
            &self.indices,
            query.rooms,
            query.pupil_teacher_ratio,
            query.next_to_river,
        );
        self.log_estimate_row(row.view(), query.confidence)
    }

    /// Log-price estimate for an already assembled feature row.
    ///
    /// The row must hold one value per model feature, in model order.
    pub fn log_estimate_row(
        &self,
        row: ArrayView1<'_, f64>,
        confidence: Confidence,
    ) -> Result<LogEstimate, ValuationError> {
        let expected = self.model.n_features();
        if row.len() != expected {
            return Err(ValuationError::RowLength {
                expected,
                got: row.len(),
            });
        }
        let estimate = row.dot(&self.model.coefficients()) + self.model.intercept();
        Ok(LogEstimate::new(estimate, self.rmse, confidence))
    }

    /// Convert a log price to rescaled currency units, without rounding.
    #[inline]
    pub fn to_dollars(&self, log_price: f64) -> f64 {
        log_price.exp() * self.config.price_unit * self.scale_factor
    }

    /// Estimated price and range, rescaled to the reference market and
    /// rounded to the configured step.
    pub fn dollar_estimate(&self, query: &PropertyQuery) -> Result<Valuation, ValuationError> {
        let log = self.log_estimate(query)?;
        let step = self.config.rounding_step;

        let valuation = Valuation {
            estimate: round_to_step(self.to_dollars(log.estimate), step),
            lower: round_to_step(self.to_dollars(log.lower), step),
            upper: round_to_step(self.to_dollars(log.upper), step),
            confidence: log.confidence,
        };

        tracing::debug!(
            rooms = query.rooms,
            pupil_teacher_ratio = query.pupil_teacher_ratio,
            next_to_river = query.next_to_river,
            estimate = valuation.estimate,
            level = log.confidence.level(),
            "valued property"
        );
        Ok(valuation)
    }

    /// [`dollar_estimate`](Self::dollar_estimate) with default river
    /// adjacency and confidence.
    pub fn estimate(
        &self,
        rooms: f64,
        pupil_teacher_ratio: f64,
    ) -> Result<Valuation, ValuationError> {
        self.dollar_estimate(&PropertyQuery::new(rooms, pupil_teacher_ratio))
    }

    /// Value many properties in parallel.
    ///
    /// Results are in query order and identical to calling
    /// [`dollar_estimate`](Self::dollar_estimate) one by one.
    pub fn dollar_estimates(
        &self,
        queries: &[PropertyQuery],
    ) -> Vec<Result<Valuation, ValuationError>> {
        queries
            .par_iter()
            .map(|query| self.dollar_estimate(query))
            .collect()
    }

    fn validate(&self, query: &PropertyQuery) -> Result<(), ValuationError> {
        let result = self.check_inputs(query);
        if let Err(ref err) = result {
            tracing::warn!(%err, "rejected valuation query");
        }
        result
    }

    fn check_inputs(&self, query: &PropertyQuery) -> Result<(), ValuationError> {
        if !query.rooms.is_finite() {
            return Err(ValuationError::NonFinite { field: "rooms" });
        }
        if !query.pupil_teacher_ratio.is_finite() {
            return Err(ValuationError::NonFinite {
                field: "pupil_teacher_ratio",
            });
        }

        let rooms = self.config.rooms;
        if !rooms.contains(query.rooms) {
            return Err(ValuationError::RoomsOutOfRange {
                value: query.rooms,
                min: rooms.min,
                max: rooms.max,
            });
        }

        let ratio = self.config.pupil_teacher_ratio;
        if !ratio.contains(query.pupil_teacher_ratio) {
            return Err(ValuationError::PupilTeacherRatioOutOfRange {
                value: query.pupil_teacher_ratio,
                min: ratio.min,
                max: ratio.max,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema;
    use crate::testing::synthetic_housing;
    use approx::assert_abs_diff_eq;

    fn valuator() -> Valuator {
        Valuator::fit(&synthetic_housing(300, 11), ValuationConfig::default()).unwrap()
    }

    #[test]
    fn fit_drops_configured_columns() {
        let v = valuator();
        assert_eq!(v.feature_names().len(), 11);
        assert!(v.coefficient(schema::INDUSTRY).is_none());
        assert!(v.coefficient(schema::AGE).is_none());
        assert_eq!(v.template().len(), 11);
        assert_eq!(
            *v.feature_indices(),
            FeatureIndices {
                crime: 0,
                zoning: 1,
                river: 2,
                rooms: 4,
                pupil_teacher_ratio: 8,
            }
        );
    }

    #[test]
    fn scale_factor_uses_median_price() {
        let dataset = synthetic_housing(300, 11);
        let v = Valuator::fit(&dataset, ValuationConfig::default()).unwrap();
        let median_price = median(&dataset.targets().to_vec()).unwrap();

        assert_abs_diff_eq!(v.scale_factor(), 583.3 / median_price, epsilon = 1e-12);
    }

    #[test]
    fn dollars_follow_conversion_formula() {
        let v = valuator();
        let query = PropertyQuery::new(6.0, 15.0);
        let log = v.log_estimate(&query).unwrap();
        let valuation = v.dollar_estimate(&query).unwrap();

        let raw = log.estimate.exp() * 1000.0 * v.scale_factor();
        assert_eq!(valuation.estimate, (raw / 1000.0).round() * 1000.0);
        assert_eq!(valuation.estimate % 1000.0, 0.0);
        assert_eq!(valuation.lower % 1000.0, 0.0);
        assert_eq!(valuation.upper % 1000.0, 0.0);
    }

    #[test]
    fn coefficients_are_named() {
        let v = valuator();
        let pairs: Vec<(&str, f64)> = v.coefficients().collect();
        assert_eq!(pairs.len(), 11);
        assert_eq!(pairs[4].0, schema::ROOMS);
        assert_eq!(Some(pairs[4].1), v.coefficient("rm"));
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let v = valuator();
        assert_eq!(
            v.estimate(f64::NAN, 15.0),
            Err(ValuationError::NonFinite { field: "rooms" })
        );
        assert_eq!(
            v.estimate(6.0, f64::INFINITY),
            Err(ValuationError::NonFinite {
                field: "pupil_teacher_ratio"
            })
        );
    }

    #[test]
    fn row_of_wrong_length_is_rejected() {
        let v = valuator();
        let short = ndarray::array![6.0, 15.0, 1.0];
        assert_eq!(
            v.log_estimate_row(short.view(), Confidence::High),
            Err(ValuationError::RowLength {
                expected: 11,
                got: 3
            })
        );
    }

    #[test]
    fn template_row_matches_query_at_means() {
        let v = valuator();
        let template = v.template().values();
        let rooms = template[v.feature_indices().rooms];
        let ratio = template[v.feature_indices().pupil_teacher_ratio];

        let mut row = template.to_owned();
        row[v.feature_indices().river] = 0.0;
        let from_row = v.log_estimate_row(row.view(), Confidence::High).unwrap();
        let from_query = v.log_estimate(&PropertyQuery::new(rooms, ratio)).unwrap();
        assert_eq!(from_row, from_query);
    }

    #[test]
    fn missing_dropped_column_fails_fit() {
        let dataset = synthetic_housing(50, 3).drop_columns(&[schema::AGE]).unwrap();
        let err = Valuator::fit(&dataset, ValuationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Dataset(DatasetError::MissingColumn(ref name)) if name == "AGE"
        ));
    }

    #[test]
    fn missing_query_column_fails_fit() {
        let dataset = synthetic_housing(50, 3)
            .drop_columns(&[schema::PUPIL_TEACHER_RATIO])
            .unwrap();
        let err = Valuator::fit(&dataset, ValuationConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Dataset(DatasetError::MissingColumn(ref name)) if name == "PTRATIO"
        ));
    }

    #[test]
    fn invalid_config_fails_fit() {
        let config = ValuationConfig {
            rounding_step: 0.0,
            ..ValuationConfig::default()
        };
        let err = Valuator::fit(&synthetic_housing(50, 3), config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
