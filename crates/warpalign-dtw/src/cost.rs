//! Local cost strategies: the pairwise element distance fed into the matrix builder.

use crate::error::BoxError;

/// Pairwise cost between one element of each sequence.
///
/// Implementations must be pure: the builder calls [`cost`][LocalCost::cost]
/// exactly once per matrix cell and in no guaranteed order (the parallel
/// builder evaluates an anti-diagonal at a time). Returned values must be
/// finite and non-negative; anything else aborts the build.
pub trait LocalCost<T: ?Sized> {
    /// Return the cost of matching `a` (from `x`) with `b` (from `y`).
    ///
    /// # Errors
    ///
    /// Any error is surfaced to the caller as
    /// [`DtwError::CostFunction`](crate::DtwError::CostFunction).
    fn cost(&self, a: &T, b: &T) -> Result<f64, BoxError>;
}

/// `|a - b|`. The default local cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteDifference;

impl<T> LocalCost<T> for AbsoluteDifference
where
    T: Copy + Into<f64>,
{
    fn cost(&self, a: &T, b: &T) -> Result<f64, BoxError> {
        Ok(((*a).into() - (*b).into()).abs())
    }
}

/// `(a - b)²`, the squared Euclidean distance between scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredDifference;

impl<T> LocalCost<T> for SquaredDifference
where
    T: Copy + Into<f64>,
{
    fn cost(&self, a: &T, b: &T) -> Result<f64, BoxError> {
        Ok(((*a).into() - (*b).into()).powi(2))
    }
}

/// Adapts an infallible closure `Fn(&T, &T) -> f64` into a [`LocalCost`].
#[derive(Clone, Copy)]
pub struct CostFn<F>(pub F);

impl<F> CostFn<F> {
    /// Wrap `f`. Pins the closure signature so argument types can be inferred.
    pub fn new<T: ?Sized>(f: F) -> Self
    where
        F: Fn(&T, &T) -> f64,
    {
        Self(f)
    }
}

impl<T: ?Sized, F> LocalCost<T> for CostFn<F>
where
    F: Fn(&T, &T) -> f64,
{
    fn cost(&self, a: &T, b: &T) -> Result<f64, BoxError> {
        Ok((self.0)(a, b))
    }
}

impl<F> std::fmt::Debug for CostFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CostFn(..)")
    }
}

/// Adapts a fallible closure `Fn(&T, &T) -> Result<f64, E>` into a [`LocalCost`].
#[derive(Clone, Copy)]
pub struct TryCostFn<F>(pub F);

impl<F> TryCostFn<F> {
    /// Wrap `f`. Pins the closure signature so argument types can be inferred.
    pub fn new<T: ?Sized, E>(f: F) -> Self
    where
        F: Fn(&T, &T) -> Result<f64, E>,
        E: Into<BoxError>,
    {
        Self(f)
    }
}

impl<T: ?Sized, F, E> LocalCost<T> for TryCostFn<F>
where
    F: Fn(&T, &T) -> Result<f64, E>,
    E: Into<BoxError>,
{
    fn cost(&self, a: &T, b: &T) -> Result<f64, BoxError> {
        (self.0)(a, b).map_err(Into::into)
    }
}

impl<F> std::fmt::Debug for TryCostFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TryCostFn(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_difference_on_integers_and_floats() {
        assert_eq!(AbsoluteDifference.cost(&3_i32, &7_i32).unwrap(), 4.0);
        assert_eq!(AbsoluteDifference.cost(&7_u8, &3_u8).unwrap(), 4.0);
        assert_eq!(AbsoluteDifference.cost(&1.5_f64, &-1.0_f64).unwrap(), 2.5);
    }

    #[test]
    fn squared_difference() {
        assert_eq!(SquaredDifference.cost(&1.0_f32, &4.0_f32).unwrap(), 9.0);
    }

    #[test]
    fn closure_costs() {
        let hamming = CostFn::new(|a: &char, b: &char| if a == b { 0.0 } else { 1.0 });
        assert_eq!(hamming.cost(&'a', &'a').unwrap(), 0.0);
        assert_eq!(hamming.cost(&'a', &'b').unwrap(), 1.0);

        let picky = TryCostFn::new(|a: &f64, b: &f64| {
            if *a < 0.0 {
                Err("negative sample")
            } else {
                Ok((a - b).abs())
            }
        });
        assert_eq!(picky.cost(&2.0, &1.0).unwrap(), 1.0);
        let err = picky.cost(&-2.0, &1.0).unwrap_err();
        assert_eq!(err.to_string(), "negative sample");
    }
}
