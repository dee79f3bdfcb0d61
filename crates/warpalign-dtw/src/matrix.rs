//! Accumulated cost matrix stored as a flat row-major buffer.

use std::ops::Index;

use crate::error::DtwError;

/// Accumulated DTW cost matrix of shape `rows x cols`.
///
/// Cell `(n, m)` lives at `data[n * cols + m]`. Always non-empty and
/// rectangular: every constructor rejects anything else.
///
/// Indexable both as `d[(n, m)]` and, row by row, as `d[n][m]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build from a buffer the builder has already filled.
    pub(crate) fn from_filled(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Create a matrix from a row-major buffer.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptyMatrix`] | `rows` or `cols` is zero |
    /// | [`DtwError::ShapeMismatch`] | `data.len() != rows * cols` |
    pub fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, DtwError> {
        if rows == 0 || cols == 0 {
            return Err(DtwError::EmptyMatrix);
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(DtwError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from nested rows, e.g. a matrix produced elsewhere.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptyMatrix`] | no rows, or the first row is empty |
    /// | [`DtwError::RaggedMatrix`] | a row's length differs from the first row's |
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, DtwError> {
        let Some(first) = rows.first() else {
            return Err(DtwError::EmptyMatrix);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(DtwError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(DtwError::RaggedMatrix {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows (`N`, the length of `x`).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`M`, the length of `y`).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Return the accumulated cost at `(n, m)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, n: usize, m: usize) -> Option<f64> {
        (n < self.rows && m < self.cols).then(|| self.data[n * self.cols + m])
    }

    /// Return row `n` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `n >= rows`.
    #[must_use]
    pub fn row(&self, n: usize) -> &[f64] {
        assert!(n < self.rows, "row index {n} out of bounds for {} rows", self.rows);
        &self.data[n * self.cols..(n + 1) * self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols)
    }

    /// The accumulated cost of the full alignment, `D[N-1][M-1]`.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.data[self.data.len() - 1]
    }

    /// The underlying row-major buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Consume and return the row-major buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (n, m): (usize, usize)) -> &Self::Output {
        assert!(
            n < self.rows && m < self.cols,
            "cell ({n}, {m}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[n * self.cols + m]
    }
}

impl Index<usize> for CostMatrix {
    type Output = [f64];

    fn index(&self, n: usize) -> &Self::Output {
        self.row(n)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = DtwError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}
