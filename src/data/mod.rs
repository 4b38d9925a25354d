//! Historical housing data.
//!
//! # Overview
//!
//! - [`HousingDataset`]: validated in-memory table (named feature columns + prices)
//! - [`schema`]: column names and by-name position lookup
//! - CSV loading via [`HousingDataset::from_csv_path`] / [`HousingDataset::from_csv_reader`]
//!
//! The crate does not own ingestion or versioning of the table; callers hand
//! it a file or an already-built matrix.

mod dataset;
mod io;
pub mod schema;

pub use dataset::{DatasetError, HousingDataset};
pub use io::LoadError;
pub use schema::FeatureIndices;
