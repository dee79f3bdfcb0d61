//! DTW configuration and the combined build-then-backtrack entry point.

use tracing::{debug, instrument};

use crate::builder::{build_cost_matrix, build_cost_matrix_par};
use crate::cost::{AbsoluteDifference, LocalCost};
use crate::error::DtwError;
use crate::matrix::CostMatrix;
use crate::path::WarpingPath;
use crate::recover::recover_path;

/// How the cost matrix is filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Row by row on the calling thread.
    #[default]
    Sequential,
    /// One anti-diagonal at a time, cells of a diagonal spread over the rayon pool.
    AntiDiagonal,
}

/// Immutable DTW configuration: a local cost strategy and a fill strategy.
///
/// ```
/// use warpalign_dtw::{Dtw, WarpingStep};
///
/// let alignment = Dtw::new().align(&[1_i32, 2, 3], &[1, 2, 2, 3]).unwrap();
/// assert_eq!(alignment.distance(), 0.0);
/// assert_eq!(alignment.path().steps().last(), Some(&WarpingStep::new(2, 3)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw<C = AbsoluteDifference> {
    cost: C,
    parallelism: Parallelism,
}

impl Dtw {
    /// Sequential DTW with the absolute difference as local cost.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> Dtw<C> {
    /// Sequential DTW with a caller-supplied local cost.
    #[must_use]
    pub fn with_cost(cost: C) -> Self {
        Self {
            cost,
            parallelism: Parallelism::Sequential,
        }
    }

    /// Choose how the cost matrix is filled. The result does not depend on it.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Return the local cost strategy.
    #[must_use]
    pub fn cost(&self) -> &C {
        &self.cost
    }

    /// Return the fill strategy.
    #[must_use]
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Build the accumulated cost matrix of `x` against `y`.
    ///
    /// Either fill strategy may be selected at runtime, so the elements and the
    /// cost strategy must be `Sync` even for [`Parallelism::Sequential`]. A cost
    /// with non-`Sync` state (a `Cell` counter, say) goes through
    /// [`build_cost_matrix`] and [`recover_path`] directly.
    ///
    /// # Errors
    ///
    /// See [`build_cost_matrix`].
    pub fn cost_matrix<T>(&self, x: &[T], y: &[T]) -> Result<CostMatrix, DtwError>
    where
        T: Sync,
        C: LocalCost<T> + Sync,
    {
        match self.parallelism {
            Parallelism::Sequential => build_cost_matrix(x, y, &self.cost),
            Parallelism::AntiDiagonal => build_cost_matrix_par(x, y, &self.cost),
        }
    }

    /// Build the cost matrix and recover the optimal warping path.
    ///
    /// Same bounds as [`Dtw::cost_matrix`].
    ///
    /// # Errors
    ///
    /// See [`build_cost_matrix`]. Path recovery itself cannot fail.
    #[instrument(skip(self, x, y), fields(rows = x.len(), cols = y.len(), parallelism = ?self.parallelism))]
    pub fn align<T>(&self, x: &[T], y: &[T]) -> Result<Alignment, DtwError>
    where
        T: Sync,
        C: LocalCost<T> + Sync,
    {
        let matrix = self.cost_matrix(x, y)?;
        let path = recover_path(&matrix);
        debug!(distance = matrix.total_cost(), path_len = path.len(), "alignment complete");
        Ok(Alignment { matrix, path })
    }
}

/// Accumulated cost matrix together with the warping path recovered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    matrix: CostMatrix,
    path: WarpingPath,
}

impl Alignment {
    /// Total accumulated cost of the optimal alignment, `D[N-1][M-1]`.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.matrix.total_cost()
    }

    /// The accumulated cost matrix.
    #[must_use]
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// The optimal warping path, from `(0, 0)` to `(N-1, M-1)`.
    #[must_use]
    pub fn path(&self) -> &WarpingPath {
        &self.path
    }

    /// Split into matrix and path.
    #[must_use]
    pub fn into_parts(self) -> (CostMatrix, WarpingPath) {
        (self.matrix, self.path)
    }
}
