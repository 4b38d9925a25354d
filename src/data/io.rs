//! CSV loading for the housing table.
//!
//! Two layouts are accepted:
//!
//! ```text
//! 506,13                      <- optional "<rows>,<columns>" preamble
//! CRIM,ZN,INDUS,...,LSTAT,MEDV
//! 0.00632,18,2.31,...,4.98,24
//! ```
//!
//! i.e. the scikit-learn distribution of the file, or any plain CSV with a
//! header row. Columns may appear in any order and names are matched
//! case-insensitively. Every column other than the target becomes a feature.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::{Array1, Array2};

use super::dataset::{DatasetError, HousingDataset};
use super::schema;

/// Errors that can occur when loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file has no header row")]
    MissingHeader,

    #[error("missing target column: {0}")]
    MissingTarget(String),

    #[error("line {line}: expected {expected} fields, got {got}")]
    RowLength {
        line: u64,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: cannot parse {value:?} in column {column} as a number")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl HousingDataset {
    /// Load a dataset from a CSV file.
    ///
    /// `target` names the price column, usually [`schema::MEDIAN_VALUE`].
    pub fn from_csv_path(path: impl AsRef<Path>, target: &str) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_csv_reader(BufReader::new(file), target)?;
        tracing::info!(
            path = %path.display(),
            rows = dataset.n_rows(),
            features = dataset.n_features(),
            "loaded housing dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV source.
    pub fn from_csv_reader<R: Read>(reader: R, target: &str) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut records = rdr.records();

        let mut header = records.next().ok_or(LoadError::MissingHeader)??;
        if is_preamble(&header) {
            header = records.next().ok_or(LoadError::MissingHeader)??;
        }

        let columns: Vec<String> = header.iter().map(str::to_string).collect();
        let target_idx = schema::position(&columns, target)
            .ok_or_else(|| LoadError::MissingTarget(target.to_string()))?;
        let names: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != target_idx)
            .map(|(_, name)| name.clone())
            .collect();

        let mut features = Vec::new();
        let mut targets = Vec::new();

        for record in records {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            if record.len() != columns.len() {
                return Err(LoadError::RowLength {
                    line,
                    expected: columns.len(),
                    got: record.len(),
                });
            }

            for (idx, field) in record.iter().enumerate() {
                let value: f64 = field.parse().map_err(|_| LoadError::Parse {
                    line,
                    column: columns[idx].clone(),
                    value: field.to_string(),
                })?;
                if idx == target_idx {
                    targets.push(value);
                } else {
                    features.push(value);
                }
            }
        }

        // Every row was checked against the header, so `features` is exactly
        // `n_rows × n_cols`.
        let n_rows = targets.len();
        let n_cols = names.len();
        let features = Array2::from_shape_fn((n_rows, n_cols), |(r, c)| features[r * n_cols + c]);
        Ok(Self::new(names, features, Array1::from(targets))?)
    }
}

/// A two-field record of non-negative integers, as written at the top of the
/// scikit-learn copy of the table.
fn is_preamble(record: &StringRecord) -> bool {
    record.len() == 2 && record.iter().all(|f| f.parse::<usize>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "\
CRIM,RM,MEDV,PTRATIO
0.1,6.5,24.0,15.3
0.2,5.9,21.6,17.8
";

    #[test]
    fn loads_plain_csv() {
        let ds = HousingDataset::from_csv_reader(PLAIN.as_bytes(), "MEDV").unwrap();

        assert_eq!(ds.n_rows(), 2);
        assert_eq!(
            ds.feature_names(),
            &["CRIM".to_string(), "RM".to_string(), "PTRATIO".to_string()]
        );
        assert_eq!(ds.column("PTRATIO").unwrap().to_vec(), vec![15.3, 17.8]);
        assert_eq!(ds.targets().to_vec(), vec![24.0, 21.6]);
    }

    #[test]
    fn rows_keep_their_values() {
        let text = "RM,MEDV,PTRATIO,CRIM\n6.5,24.0,15.3,0.1\n5.9,21.6,17.8,0.2\n7.1,34.7,17.8,0.3\n";
        let ds = HousingDataset::from_csv_reader(text.as_bytes(), "MEDV").unwrap();

        assert_eq!(ds.features().shape(), &[3, 3]);
        assert_eq!(ds.features().row(2).to_vec(), vec![7.1, 17.8, 0.3]);
        assert_eq!(ds.column("CRIM").unwrap().to_vec(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn skips_row_count_preamble() {
        let text = format!("2,3\n{PLAIN}");
        let ds = HousingDataset::from_csv_reader(text.as_bytes(), "medv").unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_features(), 3);
    }

    #[test]
    fn missing_target_column() {
        let err = HousingDataset::from_csv_reader(PLAIN.as_bytes(), "PRICE").unwrap_err();
        assert!(matches!(err, LoadError::MissingTarget(ref t) if t == "PRICE"));
    }

    #[test]
    fn reports_unparseable_field() {
        let text = "RM,MEDV\n6.5,24.0\nsix,21.6\n";
        let err = HousingDataset::from_csv_reader(text.as_bytes(), "MEDV").unwrap_err();
        match err {
            LoadError::Parse {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "RM");
                assert_eq!(value, "six");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_short_row() {
        let text = "RM,MEDV\n6.5\n";
        let err = HousingDataset::from_csv_reader(text.as_bytes(), "MEDV").unwrap_err();
        assert!(matches!(
            err,
            LoadError::RowLength {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = HousingDataset::from_csv_reader("".as_bytes(), "MEDV").unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn header_only_is_empty_dataset() {
        let err = HousingDataset::from_csv_reader("RM,MEDV\n".as_bytes(), "MEDV").unwrap_err();
        assert!(matches!(err, LoadError::Dataset(DatasetError::Empty)));
    }

    #[test]
    fn missing_file() {
        let err = HousingDataset::from_csv_path("/nonexistent/housing.csv", "MEDV").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
