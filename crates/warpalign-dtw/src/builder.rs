//! Accumulated cost matrix construction.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::cost::LocalCost;
use crate::error::{DtwError, Side};
use crate::matrix::CostMatrix;

/// Anti-diagonals shorter than this are not split further across threads.
const PAR_MIN_CELLS: usize = 256;

/// Build the accumulated cost matrix for `x` (rows) against `y` (columns).
///
/// Fills the matrix row by row:
///
/// - `D[0][0] = c(x[0], y[0])`
/// - `D[0][m] = c(x[0], y[m]) + D[0][m-1]`
/// - `D[n][0] = c(x[n], y[0]) + D[n-1][0]`
/// - `D[n][m] = c(x[n], y[m]) + min(D[n-1][m], D[n][m-1], D[n-1][m-1])`
///
/// `cost` is called exactly once per cell. Runs in O(N * M) time and space.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::EmptySequence`] | `x` or `y` is empty |
/// | [`DtwError::CostFunction`] | `cost` returned an error |
/// | [`DtwError::InvalidCost`] | `cost` returned NaN, an infinity, or a negative value |
#[instrument(skip(x, y, cost), fields(rows = x.len(), cols = y.len()))]
pub fn build_cost_matrix<T, C>(x: &[T], y: &[T], cost: &C) -> Result<CostMatrix, DtwError>
where
    C: LocalCost<T> + ?Sized,
{
    check_non_empty(x, y)?;
    let (rows, cols) = (x.len(), y.len());

    let mut data = vec![0.0; rows * cols];
    for n in 0..rows {
        for m in 0..cols {
            let c = local_cost(cost, x, y, n, m)?;
            data[n * cols + m] = c + cheapest_predecessor(&data, cols, n, m);
        }
    }

    let matrix = CostMatrix::from_filled(rows, cols, data);
    debug!(total_cost = matrix.total_cost(), "cost matrix built");
    Ok(matrix)
}

/// Build the accumulated cost matrix one anti-diagonal at a time, in parallel.
///
/// Cells with equal `n + m` only depend on the two previous anti-diagonals, so
/// each diagonal is evaluated on the rayon pool and written back before the
/// next one starts. The result is identical to [`build_cost_matrix`].
///
/// If several cells fail, which error is reported is unspecified.
///
/// # Errors
///
/// Same as [`build_cost_matrix`].
#[instrument(skip(x, y, cost), fields(rows = x.len(), cols = y.len()))]
pub fn build_cost_matrix_par<T, C>(x: &[T], y: &[T], cost: &C) -> Result<CostMatrix, DtwError>
where
    T: Sync,
    C: LocalCost<T> + Sync + ?Sized,
{
    check_non_empty(x, y)?;
    let (rows, cols) = (x.len(), y.len());

    let mut data = vec![0.0; rows * cols];
    for k in 0..rows + cols - 1 {
        let first = k.saturating_sub(cols - 1);
        let last = k.min(rows - 1);

        let values = (first..last + 1)
            .into_par_iter()
            .with_min_len(PAR_MIN_CELLS)
            .map(|n| {
                let m = k - n;
                let c = local_cost(cost, x, y, n, m)?;
                Ok(c + cheapest_predecessor(&data, cols, n, m))
            })
            .collect::<Result<Vec<f64>, DtwError>>()?;

        for (n, value) in (first..last + 1).zip(values) {
            data[n * cols + (k - n)] = value;
        }
    }

    let matrix = CostMatrix::from_filled(rows, cols, data);
    debug!(total_cost = matrix.total_cost(), "cost matrix built");
    Ok(matrix)
}

fn check_non_empty<T>(x: &[T], y: &[T]) -> Result<(), DtwError> {
    if x.is_empty() {
        return Err(DtwError::EmptySequence { which: Side::X });
    }
    if y.is_empty() {
        return Err(DtwError::EmptySequence { which: Side::Y });
    }
    Ok(())
}

/// Evaluate and validate the local cost of cell `(n, m)`.
fn local_cost<T, C>(cost: &C, x: &[T], y: &[T], n: usize, m: usize) -> Result<f64, DtwError>
where
    C: LocalCost<T> + ?Sized,
{
    let value = cost
        .cost(&x[n], &y[m])
        .map_err(|source| DtwError::CostFunction { n, m, source })?;
    if !value.is_finite() || value < 0.0 {
        return Err(DtwError::InvalidCost { n, m, value });
    }
    Ok(value)
}

/// Minimum accumulated cost over the already-filled predecessors of `(n, m)`.
///
/// Boundary cells have a single predecessor; the origin has none.
fn cheapest_predecessor(data: &[f64], cols: usize, n: usize, m: usize) -> f64 {
    match (n, m) {
        (0, 0) => 0.0,
        (0, _) => data[m - 1],
        (_, 0) => data[(n - 1) * cols],
        _ => {
            let up = data[(n - 1) * cols + m];
            let left = data[n * cols + m - 1];
            let diag = data[(n - 1) * cols + m - 1];
            up.min(left).min(diag)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::cost::{AbsoluteDifference, CostFn, SquaredDifference, TryCostFn};
    use crate::error::ErrorKind;

    const X: [i32; 6] = [1, 2, 3, 3, 2, 1];
    const Y: [i32; 6] = [1, 1, 2, 3, 3, 2];

    #[test]
    fn reference_matrix() {
        let d = build_cost_matrix(&X, &Y, &AbsoluteDifference).unwrap();
        let expected = [
            [0.0, 0.0, 1.0, 3.0, 5.0, 6.0],
            [1.0, 1.0, 0.0, 1.0, 2.0, 2.0],
            [3.0, 3.0, 1.0, 0.0, 0.0, 1.0],
            [5.0, 5.0, 2.0, 0.0, 0.0, 1.0],
            [6.0, 6.0, 2.0, 1.0, 1.0, 0.0],
            [6.0, 6.0, 3.0, 3.0, 3.0, 1.0],
        ];
        assert_eq!(d.shape(), (6, 6));
        for (n, row) in expected.iter().enumerate() {
            assert_eq!(&d[n], row.as_slice(), "row {n}");
        }
        assert_eq!(d.total_cost(), 1.0);
    }

    #[test]
    fn single_row_is_cumulative_sum() {
        // c(1,1)=0, c(1,2)=1, c(1,3)=2 accumulated left to right.
        let d = build_cost_matrix(&[1_i32], &[1, 2, 3], &AbsoluteDifference).unwrap();
        assert_eq!(d.shape(), (1, 3));
        assert_eq!(d.as_slice(), &[0.0, 1.0, 3.0]);
    }

    #[test]
    fn single_column_is_cumulative_sum() {
        let d = build_cost_matrix(&[3_i32, 1, 2], &[1], &AbsoluteDifference).unwrap();
        assert_eq!(d.shape(), (3, 1));
        assert_eq!(d.as_slice(), &[2.0, 2.0, 3.0]);
    }

    #[test]
    fn single_cell() {
        let d = build_cost_matrix(&[5_i32], &[5], &AbsoluteDifference).unwrap();
        assert_eq!(d.as_slice(), &[0.0]);
    }

    #[test]
    fn origin_equals_first_local_cost() {
        let d = build_cost_matrix(&[1.5_f64, 9.0], &[4.0, 0.0], &SquaredDifference).unwrap();
        assert_eq!(d[(0, 0)], 6.25);
    }

    #[test]
    fn custom_cost_strategy() {
        let d = build_cost_matrix(&[1_i32, 2, 3], &[1, 4, 9], &SquaredDifference).unwrap();
        assert_eq!(d.to_rows(), vec![
            vec![0.0, 9.0, 73.0],
            vec![1.0, 4.0, 53.0],
            vec![5.0, 2.0, 38.0],
        ]);
    }

    #[test]
    fn empty_sequences_rejected() {
        let err = build_cost_matrix(&[], &[1_i32, 2], &AbsoluteDifference).unwrap_err();
        assert!(matches!(err, DtwError::EmptySequence { which: Side::X }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = build_cost_matrix(&[1_i32, 2], &[], &AbsoluteDifference).unwrap_err();
        assert!(matches!(err, DtwError::EmptySequence { which: Side::Y }));

        let err = build_cost_matrix_par(&[], &[1_i32, 2], &AbsoluteDifference).unwrap_err();
        assert!(matches!(err, DtwError::EmptySequence { which: Side::X }));
    }

    #[test]
    fn cost_called_once_per_cell() {
        let calls = Cell::new(0usize);
        let counting = CostFn::new(|a: &i32, b: &i32| {
            calls.set(calls.get() + 1);
            f64::from((a - b).abs())
        });
        build_cost_matrix(&X, &Y[..4], &counting).unwrap();
        assert_eq!(calls.get(), 24);
    }

    #[test]
    fn failing_cost_aborts_build() {
        let cost = TryCostFn::new(|a: &i32, b: &i32| {
            if *a == 3 && *b == 3 {
                Err("refusing to compare threes")
            } else {
                Ok(f64::from((a - b).abs()))
            }
        });
        let err = build_cost_matrix(&X, &Y, &cost).unwrap_err();
        assert!(matches!(err, DtwError::CostFunction { n: 2, m: 3, .. }));
        assert_eq!(err.kind(), ErrorKind::CostFunctionFailure);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "refusing to compare threes");
    }

    #[test]
    fn invalid_cost_values_rejected() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let cost = CostFn::new(move |_: &f64, _: &f64| bad);
            let err = build_cost_matrix(&[1.0], &[2.0], &cost).unwrap_err();
            assert!(matches!(err, DtwError::InvalidCost { n: 0, m: 0, .. }), "{bad}");
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let x: Vec<f64> = (0..300_i32).map(|i| (f64::from(i) * 0.07).sin()).collect();
        let y: Vec<f64> = (0..417_i32).map(|i| (f64::from(i) * 0.05).cos()).collect();
        let seq = build_cost_matrix(&x, &y, &AbsoluteDifference).unwrap();
        let par = build_cost_matrix_par(&x, &y, &AbsoluteDifference).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn parallel_degenerate_shapes() {
        let row = build_cost_matrix_par(&[1_i32], &[1, 2, 3], &AbsoluteDifference).unwrap();
        assert_eq!(row.as_slice(), &[0.0, 1.0, 3.0]);
        let col = build_cost_matrix_par(&[3_i32, 1, 2], &[1], &AbsoluteDifference).unwrap();
        assert_eq!(col.as_slice(), &[2.0, 2.0, 3.0]);
    }

    #[test]
    fn parallel_propagates_cost_failure() {
        let cost = CostFn::new(|a: &f64, b: &f64| a - b);
        let err = build_cost_matrix_par(&[0.0, 1.0], &[1.0, 0.0], &cost).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CostFunctionFailure);
    }
}
