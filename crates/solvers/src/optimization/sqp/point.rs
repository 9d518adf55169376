use crate::optimization::Evaluation;

/// A point with its evaluated objective and constraint values.
///
/// Values are in the caller's units, not the solver's scaled units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<const N: usize, const C: usize> {
    /// The x value.
    pub x: [f64; N],

    /// The objective value at x.
    pub objective: f64,

    /// The constraint values at x (satisfied when `>= 0`).
    pub constraints: [f64; C],
}

impl<const N: usize, const C: usize> Point<N, C> {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: [f64; N], objective: f64, constraints: [f64; C]) -> Self {
        Self {
            x,
            objective,
            constraints,
        }
    }

    /// Returns the largest constraint violation, or zero if all are satisfied.
    #[must_use]
    pub fn max_violation(&self) -> f64 {
        max_violation(&self.constraints)
    }
}

impl<I, O, const N: usize, const C: usize> From<&Evaluation<I, O, N, C>> for Point<N, C> {
    fn from(eval: &Evaluation<I, O, N, C>) -> Self {
        Self::new(eval.x, eval.objective, eval.constraints)
    }
}

/// Largest violation `max(0, -cᵢ)` over a set of constraint values.
///
/// A NaN constraint is infinitely violated.
pub(super) fn max_violation(constraints: &[f64]) -> f64 {
    constraints.iter().fold(0.0_f64, |worst, &c| {
        if c.is_nan() {
            f64::INFINITY
        } else {
            worst.max(-c)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn satisfied_constraints_have_no_violation() {
        let point = Point::new([1.0], 0.0, [0.0, 2.5]);
        assert_relative_eq!(point.max_violation(), 0.0);
    }

    #[test]
    fn violation_is_worst_negative_constraint() {
        let point = Point::new([1.0], 0.0, [-0.5, 3.0, -2.0]);
        assert_relative_eq!(point.max_violation(), 2.0);
    }

    #[test]
    fn nan_constraint_is_never_satisfied() {
        let point = Point::new([1.0], 0.0, [1.0, f64::NAN]);
        assert!(point.max_violation().is_infinite());
    }
}
