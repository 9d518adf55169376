use promoptim_core::{ConstrainedProblem, Model, Observer};

use crate::optimization::EvalError;

use super::{Action, Point};

/// Events emitted by the SQP solver.
///
/// All values are in the caller's units. Finite-difference probes are not
/// reported unless they fail.
pub enum Event<'a, M, P, const N: usize, const C: usize>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    /// A line-search trial point was evaluated.
    Trial {
        /// The iteration this trial belongs to.
        iter: usize,

        /// Fraction of the full QP step taken.
        alpha: f64,

        /// The evaluated trial point.
        point: Point<N, C>,

        /// Merit value at the trial point, in scaled units.
        merit: f64,

        /// The model input at this point.
        input: &'a M::Input,

        /// The model output at this point.
        output: &'a M::Output,
    },

    /// A step was accepted and the search moved to a new point.
    Iterate {
        /// The iteration number, starting at 1.
        iter: usize,

        /// The accepted point.
        point: Point<N, C>,

        /// Unit-box length of the accepted step.
        step: f64,

        /// Scaled shortfall of the linearized constraints that the step
        /// could not close (zero when the linearization was satisfiable).
        slack: f64,

        /// The model input at this point.
        input: &'a M::Input,

        /// The model output at this point.
        output: &'a M::Output,
    },

    /// Model evaluation failed.
    ModelFailed {
        /// The x value where evaluation failed.
        x: [f64; N],

        /// The model error.
        error: &'a M::Error,
    },

    /// Problem method failed (input construction, objective, or constraints).
    ProblemFailed {
        /// The x value where evaluation failed.
        x: [f64; N],

        /// The problem error.
        error: &'a P::Error,
    },
}

impl<M, P, const N: usize, const C: usize> Event<'_, M, P, N, C>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    /// Returns the x value that was evaluated (or attempted).
    #[must_use]
    pub fn x(&self) -> [f64; N] {
        match self {
            Self::Trial { point, .. } | Self::Iterate { point, .. } => point.x,
            Self::ModelFailed { x, .. } | Self::ProblemFailed { x, .. } => *x,
        }
    }

    /// Returns the evaluated point, if the evaluation succeeded.
    #[must_use]
    pub fn point(&self) -> Option<Point<N, C>> {
        match self {
            Self::Trial { point, .. } | Self::Iterate { point, .. } => Some(*point),
            Self::ModelFailed { .. } | Self::ProblemFailed { .. } => None,
        }
    }

    /// Emits a failure event and returns the observer's action.
    pub(super) fn emit_failure<Obs>(
        x: [f64; N],
        error: &EvalError<M::Error, P::Error>,
        observer: &mut Obs,
    ) -> Option<Action>
    where
        Obs: for<'a> Observer<Event<'a, M, P, N, C>, Action>,
    {
        match error {
            EvalError::Model(e) => {
                let event = Event::ModelFailed { x, error: e };
                observer.observe(&event)
            }
            EvalError::Problem(e) => {
                let event = Event::ProblemFailed { x, error: e };
                observer.observe(&event)
            }
        }
    }
}
