//! In-memory housing table.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use super::schema;

/// Dataset construction and validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,

    #[error("number of column names ({names}) does not match number of columns ({columns})")]
    ColumnCountMismatch { names: usize, columns: usize },

    #[error("number of targets ({targets}) does not match number of rows ({rows})")]
    TargetLenMismatch { rows: usize, targets: usize },

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("non-finite value in row {row}, column {column}")]
    NonFinite { row: usize, column: String },

    #[error("target in row {row} must be a positive finite price, got {value}")]
    NonPositiveTarget { row: usize, value: f64 },
}

/// Historical properties: one row per property, named numeric columns, and
/// the observed price for each row.
///
/// Immutable once built. Every value is finite and every target is strictly
/// positive, so the log transform applied before fitting is always defined.
#[derive(Debug, Clone)]
pub struct HousingDataset {
    names: Vec<String>,
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl HousingDataset {
    /// Build a dataset from column names, a `[n_rows, n_columns]` feature
    /// matrix and one target per row.
    pub fn new(
        names: Vec<String>,
        features: Array2<f64>,
        targets: Array1<f64>,
    ) -> Result<Self, DatasetError> {
        let (n_rows, n_cols) = features.dim();

        if names.len() != n_cols {
            return Err(DatasetError::ColumnCountMismatch {
                names: names.len(),
                columns: n_cols,
            });
        }
        if targets.len() != n_rows {
            return Err(DatasetError::TargetLenMismatch {
                rows: n_rows,
                targets: targets.len(),
            });
        }
        if n_rows == 0 {
            return Err(DatasetError::Empty);
        }

        for (i, name) in names.iter().enumerate() {
            if schema::position(&names[..i], name).is_some() {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
        }

        for ((row, col), value) in features.indexed_iter() {
            if !value.is_finite() {
                return Err(DatasetError::NonFinite {
                    row,
                    column: names[col].clone(),
                });
            }
        }

        for (row, &value) in targets.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(DatasetError::NonPositiveTarget { row, value });
            }
        }

        Ok(Self {
            names,
            features,
            targets,
        })
    }

    /// Number of properties.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Column names, in matrix order.
    pub fn feature_names(&self) -> &[String] {
        &self.names
    }

    /// Feature matrix `[n_rows, n_features]`.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Observed prices.
    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.targets.view()
    }

    /// Natural log of the observed prices.
    pub fn log_targets(&self) -> Array1<f64> {
        self.targets.mapv(f64::ln)
    }

    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        schema::position(&self.names, name)
    }

    /// Values of a single column.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.column_index(name)
            .map(|idx| self.features.index_axis(Axis(1), idx))
    }

    /// Copy of this dataset without the named columns.
    ///
    /// Every name must exist; the remaining columns keep their relative order.
    pub fn drop_columns<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self, DatasetError> {
        let mut dropped = Vec::with_capacity(columns.len());
        for name in columns {
            let name = name.as_ref();
            let idx = self
                .column_index(name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
            dropped.push(idx);
        }

        let keep: Vec<usize> = (0..self.n_features())
            .filter(|idx| !dropped.contains(idx))
            .collect();

        Ok(Self {
            names: keep.iter().map(|&idx| self.names[idx].clone()).collect(),
            features: self.features.select(Axis(1), &keep),
            targets: self.targets.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    fn small() -> HousingDataset {
        HousingDataset::new(
            names(&["CRIM", "INDUS", "RM"]),
            array![[0.1, 2.0, 6.0], [0.2, 3.0, 7.0]],
            array![24.0, 30.0],
        )
        .unwrap()
    }

    #[test]
    fn shape_and_accessors() {
        let ds = small();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_features(), 3);
        assert_eq!(ds.column_index("rm"), Some(2));
        assert_eq!(ds.column("RM").unwrap().to_vec(), vec![6.0, 7.0]);
        assert!(ds.column("LSTAT").is_none());
    }

    #[test]
    fn drop_columns_keeps_order() {
        let ds = small().drop_columns(&["INDUS"]).unwrap();
        assert_eq!(ds.feature_names(), &["CRIM".to_string(), "RM".to_string()]);
        assert_eq!(ds.features(), array![[0.1, 6.0], [0.2, 7.0]]);
        assert_eq!(ds.targets(), array![24.0, 30.0]);
    }

    #[test]
    fn drop_unknown_column_fails() {
        let err = small().drop_columns(&["AGE"]).unwrap_err();
        assert_eq!(err, DatasetError::MissingColumn("AGE".into()));
    }

    #[test]
    fn log_targets() {
        let ds = small();
        let logs = ds.log_targets();
        assert!((logs[0] - 24.0f64.ln()).abs() < 1e-12);
        assert!((logs[1] - 30.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn rejects_target_mismatch() {
        let err = HousingDataset::new(names(&["RM"]), array![[6.0], [7.0]], array![24.0])
            .unwrap_err();
        assert_eq!(err, DatasetError::TargetLenMismatch { rows: 2, targets: 1 });
    }

    #[test]
    fn rejects_non_finite_feature() {
        let err = HousingDataset::new(
            names(&["CRIM", "RM"]),
            array![[0.1, f64::NAN]],
            array![24.0],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DatasetError::NonFinite {
                row: 0,
                column: "RM".into()
            }
        );
    }

    #[test]
    fn rejects_non_positive_target() {
        let err =
            HousingDataset::new(names(&["RM"]), array![[6.0], [7.0]], array![24.0, 0.0])
                .unwrap_err();
        assert_eq!(err, DatasetError::NonPositiveTarget { row: 1, value: 0.0 });
    }

    #[test]
    fn rejects_duplicate_column() {
        let err = HousingDataset::new(names(&["RM", "rm"]), array![[6.0, 6.0]], array![24.0])
            .unwrap_err();
        assert_eq!(err, DatasetError::DuplicateColumn("rm".into()));
    }

    #[test]
    fn rejects_empty() {
        let err = HousingDataset::new(
            names(&["RM"]),
            Array2::zeros((0, 1)),
            Array1::zeros(0),
        )
        .unwrap_err();
        assert_eq!(err, DatasetError::Empty);
    }
}
