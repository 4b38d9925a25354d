//! Baseline feature row and per-query row construction.

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use crate::data::FeatureIndices;

/// Column-wise mean of the training features.
///
/// Serves as the "typical property" every query starts from. The row is
/// never modified after construction: [`TemplateRow::query`] returns a fresh
/// copy with the query's attributes written in, so calls cannot observe each
/// other and the row can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRow {
    means: Array1<f64>,
}

impl TemplateRow {
    /// Column means of `features` `[n_rows, n_features]`.
    ///
    /// Returns `None` if there are no rows.
    pub fn from_features(features: ArrayView2<'_, f64>) -> Option<Self> {
        features.mean_axis(Axis(0)).map(|means| Self { means })
    }

    /// Number of features in the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Returns true if the row has no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// The baseline values.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.means.view()
    }

    /// Build the feature row for a hypothetical property.
    ///
    /// Starts from the baseline and overwrites room count, pupil-teacher
    /// ratio and the river dummy (`1.0` when adjacent, `0.0` otherwise).
    pub fn query(
        &self,
        indices: &FeatureIndices,
        rooms: f64,
        pupil_teacher_ratio: f64,
        next_to_river: bool,
    ) -> Array1<f64> {
        let mut row = self.means.clone();
        row[indices.rooms] = rooms;
        row[indices.pupil_teacher_ratio] = pupil_teacher_ratio;
        row[indices.river] = if next_to_river { 1.0 } else { 0.0 };
        row
    }
}
