use thiserror::Error;

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("bound {index} is not finite: [{lower}, {upper}]")]
    NonFinite { index: usize, lower: f64, upper: f64 },

    #[error("bound {index} is inverted: lower {lower} exceeds upper {upper}")]
    Inverted { index: usize, lower: f64, upper: f64 },
}

/// Lower and upper limits on each of `N` solver variables.
///
/// Every bound is finite and satisfies `lower <= upper`. A zero-width bound
/// fixes its variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    lower: [f64; N],
    upper: [f64; N],
}

impl<const N: usize> Bounds<N> {
    /// Creates bounds from `(lower, upper)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is non-finite or any lower limit exceeds
    /// its upper limit.
    pub fn new(pairs: [(f64, f64); N]) -> Result<Self, BoundsError> {
        let mut lower = [0.0; N];
        let mut upper = [0.0; N];

        for (index, (lo, hi)) in pairs.into_iter().enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(BoundsError::NonFinite {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
            if lo > hi {
                return Err(BoundsError::Inverted {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
            lower[index] = lo;
            upper[index] = hi;
        }

        Ok(Self { lower, upper })
    }

    /// Returns the lower limits.
    #[must_use]
    pub fn lower(&self) -> &[f64; N] {
        &self.lower
    }

    /// Returns the upper limits.
    #[must_use]
    pub fn upper(&self) -> &[f64; N] {
        &self.upper
    }

    /// Returns the width `upper - lower` of each bound.
    #[must_use]
    pub fn widths(&self) -> [f64; N] {
        std::array::from_fn(|i| self.upper[i] - self.lower[i])
    }

    /// Returns true if every component of `x` lies within its bound.
    #[must_use]
    pub fn contains(&self, x: &[f64; N]) -> bool {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(v, (lo, hi))| v.is_finite() && lo <= v && v <= hi)
    }

    /// Clamps each component of `x` into its bound.
    #[must_use]
    pub fn clamp(&self, x: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| x[i].clamp(self.lower[i], self.upper[i]))
    }

    /// Maps `x` into the unit box, component by component.
    ///
    /// Fixed variables (zero-width bounds) map to `0.0`.
    #[must_use]
    pub fn normalize(&self, x: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| {
            let width = self.upper[i] - self.lower[i];
            if width > 0.0 {
                (x[i] - self.lower[i]) / width
            } else {
                0.0
            }
        })
    }

    /// Maps a point in the unit box back to the bounded space.
    ///
    /// The result is clamped, so rounding never produces a point outside the
    /// bounds.
    #[must_use]
    pub fn denormalize(&self, u: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| {
            let width = self.upper[i] - self.lower[i];
            (self.lower[i] + u[i] * width).clamp(self.lower[i], self.upper[i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_inverted_bound() {
        let err = Bounds::new([(0.0, 1.0), (5.0, 2.0)]).unwrap_err();
        assert_eq!(
            err,
            BoundsError::Inverted {
                index: 1,
                lower: 5.0,
                upper: 2.0
            }
        );
    }

    #[test]
    fn rejects_non_finite_bound() {
        let err = Bounds::new([(0.0, f64::INFINITY)]).unwrap_err();
        assert!(matches!(err, BoundsError::NonFinite { index: 0, .. }));
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = Bounds::new([(0.0, 1.0), (10.0, 20.0)]).unwrap();

        assert!(bounds.contains(&[0.0, 20.0]));
        assert!(bounds.contains(&[0.5, 15.0]));
        assert!(!bounds.contains(&[-0.1, 15.0]));
        assert!(!bounds.contains(&[0.5, f64::NAN]));
    }

    #[test]
    fn normalize_round_trips_through_unit_box() {
        let bounds = Bounds::new([(100.0, 3000.0), (50.0, 500.0)]).unwrap();
        let x = [1550.0, 275.0];

        let u = bounds.normalize(&x);
        assert_relative_eq!(u[0], 0.5);
        assert_relative_eq!(u[1], 0.5);

        let back = bounds.denormalize(&u);
        assert_relative_eq!(back[0], x[0]);
        assert_relative_eq!(back[1], x[1]);
    }

    #[test]
    fn fixed_variable_normalizes_to_zero() {
        let bounds = Bounds::new([(4.0, 4.0)]).unwrap();

        assert_relative_eq!(bounds.normalize(&[4.0])[0], 0.0);
        assert_relative_eq!(bounds.denormalize(&[0.7])[0], 4.0);
    }

    #[test]
    fn denormalize_clamps_overshoot() {
        let bounds = Bounds::new([(0.0, 2.0)]).unwrap();
        assert_relative_eq!(bounds.denormalize(&[1.5])[0], 2.0);
        assert_relative_eq!(bounds.denormalize(&[-0.5])[0], 0.0);
    }
}
