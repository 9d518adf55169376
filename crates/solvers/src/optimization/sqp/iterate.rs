use crate::optimization::Evaluation;

use super::{gradient::Gradients, point::max_violation, scaling::Scaling};

/// The solver's view of an accepted point, in scaled unit-box terms.
#[derive(Debug, Clone)]
pub(super) struct Iterate<I, O, const N: usize, const C: usize> {
    pub(super) u: [f64; N],
    pub(super) objective: f64,
    pub(super) constraints: [f64; C],
    pub(super) gradients: Gradients<N, C>,
    pub(super) eval: Evaluation<I, O, N, C>,
}

impl<I, O, const N: usize, const C: usize> Iterate<I, O, N, C> {
    pub(super) fn new(
        u: [f64; N],
        eval: Evaluation<I, O, N, C>,
        raw: &Gradients<N, C>,
        scaling: &Scaling<C>,
    ) -> Self {
        Self {
            u,
            objective: scaling.objective(eval.objective),
            constraints: scaling.constraints(&eval.constraints),
            gradients: scaling.gradients(raw),
            eval,
        }
    }

    /// Scaled worst-case constraint violation.
    pub(super) fn violation(&self) -> f64 {
        max_violation(&self.constraints)
    }

    /// Merit value `f + penalty·violation`.
    pub(super) fn merit(&self, penalty: f64) -> f64 {
        self.objective + penalty * self.violation()
    }

    /// Gradient of the Lagrangian `f - λᵀc`.
    pub(super) fn lagrangian_gradient(&self, multipliers: &[f64; C]) -> [f64; N] {
        std::array::from_fn(|j| {
            let constraint_part: f64 = (0..C)
                .map(|i| multipliers[i] * self.gradients.constraints[i][j])
                .sum();
            self.gradients.objective[j] - constraint_part
        })
    }

    /// Scaled value of the linearized worst violation after step `d`.
    pub(super) fn linearized_violation(&self, d: &[f64; N]) -> f64 {
        let predicted: [f64; C] = std::array::from_fn(|i| {
            let change: f64 = (0..N).map(|j| self.gradients.constraints[i][j] * d[j]).sum();
            self.constraints[i] + change
        });
        max_violation(&predicted)
    }
}
