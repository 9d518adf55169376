/// Objective gradient and constraint Jacobian with respect to unit-box variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Gradients<const N: usize, const C: usize> {
    pub(super) objective: [f64; N],
    pub(super) constraints: [[f64; N]; C],
}

/// Estimates gradients at `u` by one-sided finite differences.
///
/// Each free variable is probed at `u + step`, or at `u - step` when the
/// forward probe would leave the unit box. Fixed variables get a zero
/// gradient and are never probed. `eval` returns the objective and
/// constraints at a probe point.
///
/// # Errors
///
/// Returns the first error produced by `eval`.
pub(super) fn finite_difference<const N: usize, const C: usize, E, F>(
    u: &[f64; N],
    base_objective: f64,
    base_constraints: &[f64; C],
    step: f64,
    fixed: &[bool; N],
    mut eval: F,
) -> Result<Gradients<N, C>, E>
where
    F: FnMut(&[f64; N]) -> Result<(f64, [f64; C]), E>,
{
    let mut gradients = Gradients {
        objective: [0.0; N],
        constraints: [[0.0; N]; C],
    };

    for j in 0..N {
        if fixed[j] {
            continue;
        }

        let h = if u[j] + step <= 1.0 { step } else { -step };
        let mut probe = *u;
        probe[j] += h;

        let (objective, constraints) = eval(&probe)?;
        gradients.objective[j] = (objective - base_objective) / h;
        for i in 0..C {
            gradients.constraints[i][j] = (constraints[i] - base_constraints[i]) / h;
        }
    }

    Ok(gradients)
}
