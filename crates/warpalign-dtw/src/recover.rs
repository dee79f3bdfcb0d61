//! Optimal warping path recovery by backtracking through a cost matrix.

use tracing::{debug, instrument};

use crate::matrix::CostMatrix;
use crate::path::{WarpingPath, WarpingStep};

/// Recover the optimal warping path from an accumulated cost matrix.
///
/// Starts at `(N-1, M-1)` and repeatedly moves to the cheapest predecessor
/// until `(0, 0)` is reached, then reverses. On the first row only the left
/// neighbour is a predecessor and on the first column only the upper one.
/// Elsewhere the candidates are, in order:
///
/// 1. the diagonal `(n-1, m-1)`, always;
/// 2. the upper cell `(n-1, m)`, unless `D[n-1][m] == D[n-1][m-1]`;
/// 3. the left cell `(n, m-1)`, unless `D[n][m-1] == D[n-1][m-1]`.
///
/// The candidate with the smallest accumulated cost wins and ties go to the
/// earliest candidate, so the diagonal is preferred whenever it is among the
/// cheapest. When several optimal paths exist this picks one of them.
///
/// Every step decreases `n + m`, so the path has between `max(N, M)` and
/// `N + M - 1` steps.
#[must_use]
#[instrument(skip(matrix), fields(rows = matrix.rows(), cols = matrix.cols()))]
pub fn recover_path(matrix: &CostMatrix) -> WarpingPath {
    let (mut n, mut m) = (matrix.rows() - 1, matrix.cols() - 1);
    let mut steps = Vec::with_capacity(matrix.rows() + matrix.cols() - 1);

    while (n, m) != (0, 0) {
        steps.push(WarpingStep::new(n, m));
        (n, m) = cheapest_predecessor(matrix, n, m);
    }
    steps.push(WarpingStep::new(0, 0));
    steps.reverse();

    debug!(len = steps.len(), "warping path recovered");
    WarpingPath::new(steps)
}

fn cheapest_predecessor(d: &CostMatrix, n: usize, m: usize) -> (usize, usize) {
    if n == 0 {
        return (0, m - 1);
    }
    if m == 0 {
        return (n - 1, 0);
    }

    let diag = d[(n - 1, m - 1)];
    let mut candidates = [Some((n - 1, m - 1)), None, None];
    if d[(n - 1, m)] != diag {
        candidates[1] = Some((n - 1, m));
    }
    if d[(n, m - 1)] != diag {
        candidates[2] = Some((n, m - 1));
    }

    let mut best = (n - 1, m - 1);
    for cell in candidates.into_iter().flatten().skip(1) {
        if d[cell] < d[best] {
            best = cell;
        }
    }
    best
}
