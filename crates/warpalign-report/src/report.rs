//! Serializable summary of one alignment.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};
use warpalign_dtw::Alignment;

use crate::error::ReportError;
use crate::grid::check_lengths;

/// JSON-serializable view of an alignment and the sequences it was computed from.
///
/// Borrowed from its inputs; the matrix is emitted row by row and the path as
/// `[a, b]` pairs.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport<'a, T> {
    x: &'a [T],
    y: &'a [T],
    distance: f64,
    path: Vec<[usize; 2]>,
    matrix: Vec<&'a [f64]>,
}

impl<'a, T> AlignmentReport<'a, T> {
    /// Assemble a report for `alignment`, computed from `x` and `y`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ReportError::LengthMismatch`] | a sequence does not match the matrix shape |
    pub fn new(x: &'a [T], y: &'a [T], alignment: &'a Alignment) -> Result<Self, ReportError> {
        let matrix = alignment.matrix();
        check_lengths(x.len(), y.len(), matrix)?;
        Ok(Self {
            x,
            y,
            distance: alignment.distance(),
            path: alignment.path().steps().iter().map(|s| [s.a, s.b]).collect(),
            matrix: matrix.iter_rows().collect(),
        })
    }

    /// Total accumulated cost of the alignment.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

impl<T: Serialize> AlignmentReport<'_, T> {
    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] if an element of `x` or `y` fails to serialize.
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty-printed JSON report to `path`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ReportError::Serialize`] | serialization failed |
    /// | [`ReportError::WriteFile`] | the file cannot be written |
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| ReportError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!("alignment report written");
        Ok(())
    }
}
