//! Column names of the historical housing table.
//!
//! Columns are always addressed by name. Positions are resolved once, when a
//! dataset or a fitted model is built, so a reordered source file cannot
//! silently shift one attribute into another's slot.

/// Per-capita crime rate by town.
pub const CRIME: &str = "CRIM";
/// Proportion of residential land zoned for lots over 25,000 sq.ft.
pub const ZONING: &str = "ZN";
/// Proportion of non-retail business acres per town.
pub const INDUSTRY: &str = "INDUS";
/// River adjacency dummy (1 if the tract bounds the river, 0 otherwise).
pub const RIVER: &str = "CHAS";
/// Nitric oxides concentration.
pub const NITRIC_OXIDES: &str = "NOX";
/// Average number of rooms per dwelling.
pub const ROOMS: &str = "RM";
/// Proportion of owner-occupied units built prior to 1940.
pub const AGE: &str = "AGE";
/// Weighted distance to employment centres.
pub const DISTANCE: &str = "DIS";
/// Index of accessibility to radial highways.
pub const HIGHWAYS: &str = "RAD";
/// Full-value property tax rate per $10,000.
pub const TAX: &str = "TAX";
/// Pupil-teacher ratio by town.
pub const PUPIL_TEACHER_RATIO: &str = "PTRATIO";
/// Demographic index `1000(Bk - 0.63)^2`.
pub const BLACK: &str = "B";
/// Percentage of lower-status population.
pub const LOWER_STATUS: &str = "LSTAT";

/// Median value of owner-occupied homes, in thousands of dollars.
pub const MEDIAN_VALUE: &str = "MEDV";

/// The 13 raw feature columns in their canonical order.
pub const FEATURE_COLUMNS: [&str; 13] = [
    CRIME,
    ZONING,
    INDUSTRY,
    RIVER,
    NITRIC_OXIDES,
    ROOMS,
    AGE,
    DISTANCE,
    HIGHWAYS,
    TAX,
    PUPIL_TEACHER_RATIO,
    BLACK,
    LOWER_STATUS,
];

/// Columns left out of the regression by default.
pub const DEFAULT_DROPPED_COLUMNS: [&str; 2] = [INDUSTRY, AGE];

/// Case-insensitive lookup of `name` in `names`.
pub(crate) fn position(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|n| n.eq_ignore_ascii_case(name))
}

/// Positions of the attributes a query overwrites, plus the two that the
/// original schema documents alongside them.
///
/// Resolved from feature names when a model is fitted. `crime` and `zoning`
/// are never written by a query; they are resolved so that a table missing
/// them fails at fit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureIndices {
    pub crime: usize,
    pub zoning: usize,
    pub river: usize,
    pub rooms: usize,
    pub pupil_teacher_ratio: usize,
}

impl FeatureIndices {
    /// Resolve positions by name.
    ///
    /// Returns the first missing column name on failure.
    pub fn resolve(names: &[String]) -> Result<Self, &'static str> {
        let find = |name: &'static str| position(names, name).ok_or(name);
        Ok(Self {
            crime: find(CRIME)?,
            zoning: find(ZONING)?,
            river: find(RIVER)?,
            rooms: find(ROOMS)?,
            pupil_teacher_ratio: find(PUPIL_TEACHER_RATIO)?,
        })
    }
}
