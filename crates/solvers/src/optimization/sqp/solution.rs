use promoptim_core::Snapshot;

use super::point::max_violation;

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The QP step fell below the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// No trial step reduced the merit function within the backtrack limit.
    LineSearchStalled,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an SQP search.
///
/// The reported point is the best feasible point found, or the least
/// infeasible one if no evaluated point met the feasibility tolerance.
/// Callers decide what violation they accept using [`Solution::max_violation`].
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize, const C: usize> {
    /// Final solver status.
    pub status: Status,

    /// Best estimate of the constrained optimum.
    pub x: [f64; N],

    /// Objective value at the reported x.
    pub objective: f64,

    /// Constraint values at the reported x.
    pub constraints: [f64; C],

    /// Snapshot at the reported x.
    pub snapshot: Snapshot<I, O>,

    /// Iteration count when the solver finished.
    pub iters: usize,

    /// Total number of model calls made.
    pub evals: usize,
}

impl<I, O, const N: usize, const C: usize> Solution<I, O, N, C> {
    /// Returns the largest constraint violation at the reported x.
    #[must_use]
    pub fn max_violation(&self) -> f64 {
        max_violation(&self.constraints)
    }
}
