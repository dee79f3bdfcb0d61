//! Error types for cost matrix construction and path recovery.

use std::error::Error as StdError;

/// Boxed error returned by a fallible local cost function.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Which input sequence an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first sequence (`x`, rows of the matrix).
    X,
    /// The second sequence (`y`, columns of the matrix).
    Y,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Coarse classification of a [`DtwError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-side precondition was violated (empty sequence, malformed matrix).
    InvalidInput,
    /// The local cost function failed or produced an unusable value.
    CostFunctionFailure,
}

/// Errors from cost matrix construction and matrix assembly.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when either input sequence has no elements.
    #[error("sequence {which} must be non-empty")]
    EmptySequence {
        /// The offending sequence.
        which: Side,
    },

    /// Returned when a matrix is assembled from zero rows or zero columns.
    #[error("cost matrix must be non-empty")]
    EmptyMatrix,

    /// Returned when the rows of a nested matrix have different lengths.
    #[error("cost matrix is not rectangular: row {row} has {got} columns, expected {expected}")]
    RaggedMatrix {
        /// Zero-based index of the first offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// Returned when a flat buffer does not hold exactly `rows * cols` values.
    #[error("buffer of length {len} cannot hold a {rows}x{cols} cost matrix")]
    ShapeMismatch {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
        /// Actual buffer length.
        len: usize,
    },

    /// Wraps an error raised by a fallible local cost function.
    #[error("local cost function failed at cell ({n}, {m})")]
    CostFunction {
        /// Row index of the cell being computed.
        n: usize,
        /// Column index of the cell being computed.
        m: usize,
        /// Error returned by the cost function.
        #[source]
        source: BoxError,
    },

    /// Returned when the local cost is NaN, infinite, or negative.
    #[error("local cost at cell ({n}, {m}) is {value}, expected a finite non-negative number")]
    InvalidCost {
        /// Row index of the cell being computed.
        n: usize,
        /// Column index of the cell being computed.
        m: usize,
        /// The rejected value.
        value: f64,
    },
}

impl DtwError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySequence { .. }
            | Self::EmptyMatrix
            | Self::RaggedMatrix { .. }
            | Self::ShapeMismatch { .. } => ErrorKind::InvalidInput,
            Self::CostFunction { .. } | Self::InvalidCost { .. } => ErrorKind::CostFunctionFailure,
        }
    }
}
