//! Human-readable and JSON renderings of DTW alignments.
//!
//! Kept apart from `warpalign-dtw` so the computation core stays free of
//! formatting and file I/O.

mod error;
mod grid;
mod report;

pub use error::ReportError;
pub use grid::{Grid, render_grid};
pub use report::AlignmentReport;
