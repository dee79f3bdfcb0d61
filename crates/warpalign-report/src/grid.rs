//! Plain-text grid rendering of an accumulated cost matrix.

use std::fmt::{self, Display};

use warpalign_dtw::{CostMatrix, Side};

use crate::error::ReportError;

/// Text grid of an accumulated cost matrix headed by the elements of `x` and `y`.
///
/// The first line is `x\y` followed by every `y[m]` in brackets; each
/// following line is `x[n]` in brackets followed by row `n` of the matrix.
/// Tokens are separated by a single space.
///
/// ```text
/// x\y [1] [2]
/// [1] [0] [1]
/// [3] [2] [1]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a, X, Y> {
    x: &'a [X],
    y: &'a [Y],
    matrix: &'a CostMatrix,
}

impl<'a, X, Y> Grid<'a, X, Y> {
    /// Pair `matrix` with its row and column labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ReportError::LengthMismatch`] | `x.len() != rows` or `y.len() != cols` |
    pub fn new(x: &'a [X], y: &'a [Y], matrix: &'a CostMatrix) -> Result<Self, ReportError> {
        check_lengths(x.len(), y.len(), matrix)?;
        Ok(Self { x, y, matrix })
    }
}

impl<X: Display, Y: Display> fmt::Display for Grid<'_, X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x\\y")?;
        for value in self.y {
            write!(f, " [{value}]")?;
        }
        writeln!(f)?;

        for (label, row) in self.x.iter().zip(self.matrix.iter_rows()) {
            write!(f, "[{label}]")?;
            for cost in row {
                write!(f, " [{cost}]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render `matrix` as a [`Grid`] string.
///
/// # Errors
///
/// Same as [`Grid::new`].
pub fn render_grid<X, Y>(x: &[X], y: &[Y], matrix: &CostMatrix) -> Result<String, ReportError>
where
    X: Display,
    Y: Display,
{
    Ok(Grid::new(x, y, matrix)?.to_string())
}

pub(crate) fn check_lengths(
    x_len: usize,
    y_len: usize,
    matrix: &CostMatrix,
) -> Result<(), ReportError> {
    if x_len != matrix.rows() {
        return Err(ReportError::LengthMismatch {
            which: Side::X,
            expected: matrix.rows(),
            got: x_len,
        });
    }
    if y_len != matrix.cols() {
        return Err(ReportError::LengthMismatch {
            which: Side::Y,
            expected: matrix.cols(),
            got: y_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use warpalign_dtw::{AbsoluteDifference, build_cost_matrix};

    use super::*;

    #[test]
    fn renders_headers_and_rows() {
        let x = [1_i32, 3];
        let y = [1_i32, 2];
        let d = build_cost_matrix(&x, &y, &AbsoluteDifference).unwrap();
        let grid = render_grid(&x, &y, &d).unwrap();
        assert_eq!(grid, "x\\y [1] [2]\n[1] [0] [1]\n[3] [2] [1]\n");
    }

    #[test]
    fn grid_formats_through_display() {
        let d = CostMatrix::from_rows(&[vec![2.0], vec![3.5]]).unwrap();
        let grid = Grid::new(&[7_i32, 8], &["q"], &d).unwrap();
        assert_eq!(format!("{grid}"), "x\\y [q]\n[7] [2]\n[8] [3.5]\n");
        assert!(Grid::new(&[7_i32], &["q"], &d).is_err());
    }

    #[test]
    fn fractional_costs_keep_their_digits() {
        let x = [0.5_f64];
        let y = [1.75_f64, 2.0];
        let d = build_cost_matrix(&x, &y, &AbsoluteDifference).unwrap();
        let grid = render_grid(&x, &y, &d).unwrap();
        assert_eq!(grid.lines().nth(1), Some("[0.5] [1.25] [2.75]"));
    }

    #[test]
    fn labels_may_differ_from_values() {
        let d = CostMatrix::from_rows(&[vec![0.0, 4.0]]).unwrap();
        let grid = render_grid(&["a"], &["b", "c"], &d).unwrap();
        assert_eq!(grid, "x\\y [b] [c]\n[a] [0] [4]\n");
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let d = CostMatrix::from_rows(&[vec![0.0, 1.0]]).unwrap();
        let err = render_grid(&[1, 2], &[1, 2], &d).unwrap_err();
        assert!(matches!(
            err,
            ReportError::LengthMismatch {
                which: Side::X,
                expected: 1,
                got: 2
            }
        ));
        let err = render_grid(&[1], &[1, 2, 3], &d).unwrap_err();
        assert!(matches!(err, ReportError::LengthMismatch { which: Side::Y, .. }));
    }
}
