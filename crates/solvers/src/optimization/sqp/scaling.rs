use super::{gradient::Gradients, linalg::inf_norm};

/// Divisors that bring the objective and each constraint to unit scale.
///
/// Each divisor is the infinity norm of the function's unit-box gradient at
/// the initial point, falling back to its magnitude when the gradient
/// vanishes, and to one when both do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Scaling<const C: usize> {
    objective: f64,
    constraints: [f64; C],
}

impl<const C: usize> Scaling<C> {
    pub(super) fn new<const N: usize>(
        objective: f64,
        constraints: &[f64; C],
        gradients: &Gradients<N, C>,
    ) -> Self {
        Self {
            objective: magnitude(&gradients.objective, objective),
            constraints: std::array::from_fn(|i| {
                magnitude(&gradients.constraints[i], constraints[i])
            }),
        }
    }

    pub(super) fn objective(&self, value: f64) -> f64 {
        value / self.objective
    }

    pub(super) fn constraints(&self, values: &[f64; C]) -> [f64; C] {
        std::array::from_fn(|i| values[i] / self.constraints[i])
    }

    pub(super) fn gradients<const N: usize>(&self, raw: &Gradients<N, C>) -> Gradients<N, C> {
        Gradients {
            objective: raw.objective.map(|g| g / self.objective),
            constraints: std::array::from_fn(|i| {
                raw.constraints[i].map(|g| g / self.constraints[i])
            }),
        }
    }
}

fn magnitude(gradient: &[f64], value: f64) -> f64 {
    let norm = inf_norm(gradient);
    if norm.is_finite() && norm > 0.0 {
        norm
    } else if value.is_finite() && value != 0.0 {
        value.abs()
    } else {
        1.0
    }
}
