//! Classical Dynamic Time Warping: accumulated cost matrices and warping paths.
//!
//! Pure math library with no I/O. [`build_cost_matrix`] fills the N×M
//! accumulated cost matrix from two sequences and a [`LocalCost`] strategy;
//! [`recover_path`] backtracks through that matrix to the optimal warping path.
//! [`Dtw`] bundles both steps behind a small immutable configuration.
//!
//! ```
//! use warpalign_dtw::{build_cost_matrix, recover_path, AbsoluteDifference};
//!
//! let x = [1_i32, 2, 3, 3, 2, 1];
//! let y = [1_i32, 1, 2, 3, 3, 2];
//! let d = build_cost_matrix(&x, &y, &AbsoluteDifference)?;
//! assert_eq!(d[5][5], 1.0);
//!
//! let path = recover_path(&d);
//! assert_eq!(path.to_string(), "[(0, 0), (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 5)]");
//! # Ok::<(), warpalign_dtw::DtwError>(())
//! ```

mod builder;
mod cost;
mod dtw;
mod error;
mod matrix;
mod path;
mod recover;

pub use builder::{build_cost_matrix, build_cost_matrix_par};
pub use cost::{AbsoluteDifference, CostFn, LocalCost, SquaredDifference, TryCostFn};
pub use dtw::{Alignment, Dtw, Parallelism};
pub use error::{BoxError, DtwError, ErrorKind, Side};
pub use matrix::CostMatrix;
pub use path::{WarpingPath, WarpingStep};
pub use recover::recover_path;
