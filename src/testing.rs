//! Testing utilities for property-valuation.
//!
//! Deterministic, Boston-shaped synthetic tables for unit tests, integration
//! tests, doc examples and benchmarks. Prices follow a known log-linear model
//! so fitted coefficients can be checked against the truth.
//!
//! ```
//! use property_valuation::testing::synthetic_housing;
//!
//! let dataset = synthetic_housing(100, 42);
//! assert_eq!(dataset.n_rows(), 100);
//! assert_eq!(dataset.n_features(), 13);
//! ```

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::schema::{self, FEATURE_COLUMNS};
use crate::data::HousingDataset;

// =============================================================================
// Generating model
// =============================================================================

/// Intercept of the generating log-price model.
pub const TRUE_INTERCEPT: f64 = 3.5;

/// Generating log-price coefficients. `INDUS` and `AGE` do not affect price.
pub const TRUE_COEFFICIENTS: [(&str, f64); 11] = [
    (schema::CRIME, -0.01),
    (schema::ZONING, 0.001),
    (schema::RIVER, 0.08),
    (schema::NITRIC_OXIDES, -0.6),
    (schema::ROOMS, 0.08),
    (schema::DISTANCE, -0.04),
    (schema::HIGHWAYS, 0.01),
    (schema::TAX, -0.0005),
    (schema::PUPIL_TEACHER_RATIO, -0.03),
    (schema::BLACK, 0.0005),
    (schema::LOWER_STATUS, -0.03),
];

/// Default standard deviation of the log-price noise.
pub const DEFAULT_NOISE: f64 = 0.1;

/// Generating coefficient of a column (0.0 for unlisted columns).
pub fn true_coefficient(name: &str) -> f64 {
    TRUE_COEFFICIENTS
        .iter()
        .find(|(col, _)| col.eq_ignore_ascii_case(name))
        .map_or(0.0, |&(_, w)| w)
}

// =============================================================================
// Generators
// =============================================================================

/// Synthetic table with [`DEFAULT_NOISE`] log-price noise.
pub fn synthetic_housing(n_rows: usize, seed: u64) -> HousingDataset {
    synthetic_housing_with_noise(n_rows, seed, DEFAULT_NOISE)
}

/// Synthetic table with all 13 raw columns in canonical order and a `MEDV`
/// target in thousands of dollars.
///
/// `noise` is the standard deviation of uniform noise added to the log
/// price; `0.0` gives a table the regression fits exactly.
///
/// # Panics
///
/// Panics if `n_rows` is zero.
pub fn synthetic_housing_with_noise(n_rows: usize, seed: u64, noise: f64) -> HousingDataset {
    assert!(n_rows > 0, "synthetic dataset needs at least one row");

    let mut rng = StdRng::seed_from_u64(seed);
    let half_range = noise * 3.0f64.sqrt();
    let n_cols = FEATURE_COLUMNS.len();

    let mut features = Vec::with_capacity(n_rows * n_cols);
    let mut targets = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let row = sample_row(&mut rng);

        let mut log_price = TRUE_INTERCEPT;
        for (name, value) in FEATURE_COLUMNS.iter().zip(row.iter()) {
            log_price += true_coefficient(name) * value;
        }
        if half_range > 0.0 {
            log_price += rng.gen_range(-half_range..half_range);
        }

        features.extend_from_slice(&row);
        targets.push(log_price.exp());
    }

    let names = FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect();
    let features = Array2::from_shape_vec((n_rows, n_cols), features)
        .expect("row width matches column count");

    HousingDataset::new(names, features, Array1::from(targets))
        .expect("generated values are finite and prices positive")
}

/// One row of raw attributes, in [`FEATURE_COLUMNS`] order.
fn sample_row(rng: &mut StdRng) -> [f64; 13] {
    let zoning = if rng.gen_bool(0.7) {
        0.0
    } else {
        rng.gen_range(10.0..100.0)
    };
    let river = if rng.gen_bool(0.15) { 1.0 } else { 0.0 };

    [
        rng.gen_range(0.0..10.0),          // CRIM
        zoning,                            // ZN
        rng.gen_range(0.5..27.0),          // INDUS
        river,                             // CHAS
        rng.gen_range(0.38..0.87),         // NOX
        rng.gen_range(3.5..8.8),           // RM
        rng.gen_range(3.0..100.0),         // AGE
        rng.gen_range(1.1..12.0),          // DIS
        rng.gen_range(1..=24) as f64,      // RAD
        rng.gen_range(187.0..711.0),       // TAX
        rng.gen_range(12.6..22.0),         // PTRATIO
        rng.gen_range(300.0..397.0),       // B
        rng.gen_range(1.7..38.0),          // LSTAT
    ]
}

/// Render a dataset as CSV with a header row and a trailing `MEDV` column.
pub fn to_csv(dataset: &HousingDataset) -> String {
    let mut out = String::new();

    let header: Vec<&str> = dataset
        .feature_names()
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(schema::MEDIAN_VALUE))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for (row, target) in dataset.features().rows().into_iter().zip(dataset.targets()) {
        let fields: Vec<String> = row
            .iter()
            .chain(std::iter::once(target))
            .map(|v| v.to_string())
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}
