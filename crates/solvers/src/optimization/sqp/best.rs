use crate::optimization::Evaluation;

use super::{Solution, Status};

/// Tracks the best evaluation encountered so far.
///
/// Feasible points (scaled violation within tolerance) beat infeasible ones.
/// Among feasible points the lowest objective wins; among infeasible points
/// the smallest violation wins.
pub(super) struct Best<I, O, const N: usize, const C: usize> {
    eval: Evaluation<I, O, N, C>,
    violation: f64,
    feasible: bool,
}

impl<I, O, const N: usize, const C: usize> Best<I, O, N, C> {
    /// Starts tracking from a first evaluation.
    pub(super) fn new(eval: Evaluation<I, O, N, C>, violation: f64, tol: f64) -> Self {
        Self {
            eval,
            violation,
            feasible: violation <= tol,
        }
    }

    /// Replaces the tracked evaluation if `eval` is better.
    pub(super) fn update(&mut self, eval: Evaluation<I, O, N, C>, violation: f64, tol: f64) {
        let feasible = violation <= tol;
        let better = match (feasible, self.feasible) {
            (true, false) => true,
            (true, true) => eval.objective < self.eval.objective || self.eval.objective.is_nan(),
            (false, false) => violation < self.violation,
            (false, true) => false,
        };

        if better {
            self.eval = eval;
            self.violation = violation;
            self.feasible = feasible;
        }
    }

    /// Finalizes the solver using the best evaluation.
    pub(super) fn finish(
        self,
        status: Status,
        iters: usize,
        evals: usize,
    ) -> Solution<I, O, N, C> {
        Solution {
            status,
            x: self.eval.x,
            objective: self.eval.objective,
            constraints: self.eval.constraints,
            snapshot: self.eval.snapshot,
            iters,
            evals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use promoptim_core::Snapshot;

    const TOL: f64 = 1e-9;

    fn eval(x: f64, objective: f64, constraint: f64) -> Evaluation<(), (), 1, 1> {
        Evaluation {
            x: [x],
            objective,
            constraints: [constraint],
            snapshot: Snapshot::new((), ()),
        }
    }

    fn track(evals: &[(f64, f64, f64)]) -> Solution<(), (), 1, 1> {
        let (first, rest) = evals.split_first().expect("at least one eval");
        let mut best = Best::new(
            eval(first.0, first.1, first.2),
            (-first.2).max(0.0),
            TOL,
        );
        for &(x, objective, constraint) in rest {
            best.update(eval(x, objective, constraint), (-constraint).max(0.0), TOL);
        }
        best.finish(Status::Converged, 3, 7)
    }

    #[test]
    fn feasible_beats_infeasible() {
        let solution = track(&[(1.0, -10.0, -1.0), (2.0, 5.0, 0.0)]);
        assert_relative_eq!(solution.x[0], 2.0);
    }

    #[test]
    fn lower_objective_wins_among_feasible() {
        let solution = track(&[(1.0, 3.0, 1.0), (2.0, 1.0, 0.5), (3.0, 2.0, 2.0)]);
        assert_relative_eq!(solution.x[0], 2.0);
        assert_relative_eq!(solution.objective, 1.0);
    }

    #[test]
    fn smaller_violation_wins_among_infeasible() {
        let solution = track(&[(1.0, 0.0, -3.0), (2.0, 9.0, -0.5), (3.0, -9.0, -2.0)]);
        assert_relative_eq!(solution.x[0], 2.0);
    }

    #[test]
    fn infeasible_never_replaces_feasible() {
        let solution = track(&[(1.0, 0.0, 0.0), (2.0, -100.0, -1e-3)]);
        assert_relative_eq!(solution.x[0], 1.0);
    }

    #[test]
    fn finish_builds_solution() {
        let solution = track(&[(4.0, 1.5, 2.0)]);

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 3);
        assert_eq!(solution.evals, 7);
        assert_relative_eq!(solution.constraints[0], 2.0);
    }
}
