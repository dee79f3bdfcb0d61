//! Warping path types for DTW alignment.

use std::fmt;

/// A single step in a warping path, matching index `a` of `x` with index `b` of `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WarpingStep {
    /// Index in the first sequence (matrix row).
    pub a: usize,
    /// Index in the second sequence (matrix column).
    pub b: usize,
}

impl WarpingStep {
    /// Create a step matching `x[a]` with `y[b]`.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

impl From<(usize, usize)> for WarpingStep {
    fn from((a, b): (usize, usize)) -> Self {
        Self { a, b }
    }
}

impl From<WarpingStep> for (usize, usize) {
    fn from(step: WarpingStep) -> Self {
        (step.a, step.b)
    }
}

impl fmt::Display for WarpingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// An ordered sequence of warping steps from `(0, 0)` to `(N-1, M-1)`.
///
/// Produced by [`recover_path`](crate::recover_path); never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        debug_assert!(!steps.is_empty());
        Self(steps)
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a recovered path. Provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The steps as plain `(a, b)` tuples.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(usize, usize)> {
        self.0.iter().map(|&s| s.into()).collect()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<WarpingStep> {
        self.0
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for WarpingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_pairs() {
        let path = WarpingPath::new(vec![
            WarpingStep::new(0, 0),
            WarpingStep::new(0, 1),
            WarpingStep::new(1, 2),
        ]);
        assert_eq!(path.to_string(), "[(0, 0), (0, 1), (1, 2)]");
    }

    #[test]
    fn pairs_and_tuple_conversions() {
        let path = WarpingPath::new(vec![(0, 0).into(), (1, 1).into()]);
        assert_eq!(path.to_pairs(), vec![(0, 0), (1, 1)]);
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
        assert_eq!((&path).into_iter().count(), 2);
    }
}
