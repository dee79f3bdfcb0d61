//! Error types for rendering and writing alignment reports.

use std::path::PathBuf;

use warpalign_dtw::Side;

/// Errors from grid rendering and report serialization.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Returned when a sequence length does not match the matching matrix dimension.
    #[error("sequence {which} has {got} elements but the matrix has {expected}")]
    LengthMismatch {
        /// The offending sequence.
        which: Side,
        /// Matrix rows for `x`, columns for `y`.
        expected: usize,
        /// Length of the sequence.
        got: usize,
    },

    /// Wraps a JSON serialization failure.
    #[error("cannot serialize alignment report")]
    Serialize(#[from] serde_json::Error),

    /// Returned when a report file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
