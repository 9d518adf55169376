use promoptim_core::{ConstrainedProblem, Model, Observer};

use promoptim_solvers::optimization::sqp;

use crate::traits::{HasObjective, HasViolation};

/// Reports solver progress through `tracing` and never intervenes.
///
/// Accepted steps are logged at `debug`, line-search trials at `trace`, and
/// evaluation failures at `warn`. Install a subscriber to see them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceObserver {
    label: &'static str,
}

impl TraceObserver {
    /// Creates an observer that tags every record with `label`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }

    /// Returns the label attached to each record.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<M, P, const N: usize, const C: usize> Observer<sqp::Event<'_, M, P, N, C>, sqp::Action>
    for TraceObserver
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    fn observe(&mut self, event: &sqp::Event<'_, M, P, N, C>) -> Option<sqp::Action> {
        let label = self.label;
        match event {
            sqp::Event::Iterate {
                iter, step, slack, ..
            } => {
                tracing::debug!(
                    label,
                    iter,
                    step,
                    slack,
                    objective = event.objective(),
                    violation = event.violation(),
                    x = ?event.x(),
                    "accepted step"
                );
            }
            sqp::Event::Trial {
                iter, alpha, merit, ..
            } => {
                tracing::trace!(
                    label,
                    iter,
                    alpha,
                    merit,
                    objective = event.objective(),
                    violation = event.violation(),
                    "line-search trial"
                );
            }
            sqp::Event::ModelFailed { x, error } => {
                tracing::warn!(label, x = ?x, error = %error, "model evaluation failed");
            }
            sqp::Event::ProblemFailed { x, error } => {
                tracing::warn!(label, x = ?x, error = %error, "problem evaluation failed");
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use promoptim_core::Bounds;

    struct Shifted;

    impl Model for Shifted {
        type Input = [f64; 1];
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok((x[0] - 0.3).powi(2))
        }
    }

    struct OutputIsObjective;

    impl ConstrainedProblem<1, 0> for OutputIsObjective {
        type Input = [f64; 1];
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
            Ok(*x)
        }

        fn objective(&self, _input: &[f64; 1], output: &f64) -> Result<f64, Self::Error> {
            Ok(*output)
        }

        fn constraints(&self, _input: &[f64; 1], _output: &f64) -> Result<[f64; 0], Self::Error> {
            Ok([])
        }
    }

    #[test]
    fn label_is_kept() {
        assert_eq!(TraceObserver::new("promo").label(), "promo");
        assert_eq!(TraceObserver::default().label(), "");
    }

    #[test]
    fn tracing_does_not_change_the_solution() {
        let bounds = Bounds::new([(0.0, 1.0)]).unwrap();
        let config = sqp::Config::default();

        let traced = sqp::minimize(
            &Shifted,
            &OutputIsObjective,
            &bounds,
            [0.9],
            &config,
            TraceObserver::new("test"),
        )
        .unwrap();
        let plain =
            sqp::minimize_unobserved(&Shifted, &OutputIsObjective, &bounds, [0.9], &config)
                .unwrap();

        assert_eq!(traced.status, plain.status);
        assert_eq!(traced.x, plain.x);
        assert_relative_eq!(traced.x[0], 0.3, epsilon = 1e-5);
    }
}
