use promoptim_core::{Bounds, ConstrainedProblem, Model, Observer};

use crate::optimization::{Evaluation, evaluate};

use super::{
    Action, Error, Event, Point,
    gradient::{Gradients, finite_difference},
    point::max_violation,
    scaling::Scaling,
};

/// Why a gradient evaluation did not complete.
pub(super) enum Interrupt {
    Stop,
    Fail(Error),
}

/// Result of evaluating one line-search trial.
pub(super) enum TrialOutcome<I, O, const N: usize, const C: usize> {
    Evaluated {
        eval: Evaluation<I, O, N, C>,
        merit: f64,
        violation: f64,
    },
    Rejected,
    Stop,
}

/// Owns everything needed to evaluate unit-box points and report them.
pub(super) struct EvalContext<'s, M, P, Obs, const N: usize, const C: usize> {
    model: &'s M,
    problem: &'s P,
    bounds: &'s Bounds<N>,
    observer: Obs,
    evals: usize,
}

impl<'s, M, P, Obs, const N: usize, const C: usize> EvalContext<'s, M, P, Obs, N, C>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P, N, C>, Action>,
{
    pub(super) fn new(model: &'s M, problem: &'s P, bounds: &'s Bounds<N>, observer: Obs) -> Self {
        Self {
            model,
            problem,
            bounds,
            observer,
            evals: 0,
        }
    }

    /// Number of model evaluations attempted so far.
    pub(super) fn evals(&self) -> usize {
        self.evals
    }

    /// Evaluates the caller's initial point.
    ///
    /// A failure is reported to the observer and then returned as an error,
    /// since there is no point yet to fall back to.
    pub(super) fn initial(
        &mut self,
        x: [f64; N],
    ) -> Result<Evaluation<M::Input, M::Output, N, C>, Error> {
        self.evals += 1;
        evaluate(self.model, self.problem, x).map_err(|e| {
            let _ = Event::<M, P, N, C>::emit_failure(x, &e, &mut self.observer);
            e.into()
        })
    }

    /// Estimates raw (unscaled) gradients at unit-box point `u`, where `base`
    /// was evaluated.
    pub(super) fn gradients(
        &mut self,
        u: &[f64; N],
        base: &Evaluation<M::Input, M::Output, N, C>,
        fd_step: f64,
        fixed: &[bool; N],
    ) -> Result<Gradients<N, C>, Interrupt> {
        let (model, problem, bounds) = (self.model, self.problem, self.bounds);
        let observer = &mut self.observer;
        let evals = &mut self.evals;

        finite_difference(
            u,
            base.objective,
            &base.constraints,
            fd_step,
            fixed,
            |probe| {
                *evals += 1;
                let x = bounds.denormalize(probe);
                match evaluate(model, problem, x) {
                    Ok(eval) => Ok((eval.objective, eval.constraints)),
                    Err(e) => match Event::<M, P, N, C>::emit_failure(x, &e, &mut *observer) {
                        Some(Action::StopEarly) => Err(Interrupt::Stop),
                        _ => Err(Interrupt::Fail(e.into())),
                    },
                }
            },
        )
    }

    /// Evaluates a line-search trial and lets the observer judge it.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails and the observer neither stops
    /// nor rejects the trial.
    pub(super) fn trial(
        &mut self,
        iter: usize,
        alpha: f64,
        u: &[f64; N],
        scaling: &Scaling<C>,
        penalty: f64,
    ) -> Result<TrialOutcome<M::Input, M::Output, N, C>, Error> {
        self.evals += 1;
        let x = self.bounds.denormalize(u);

        match evaluate(self.model, self.problem, x) {
            Ok(eval) => {
                let violation = max_violation(&scaling.constraints(&eval.constraints));
                let merit = scaling.objective(eval.objective) + penalty * violation;
                let event = Event::Trial {
                    iter,
                    alpha,
                    point: Point::from(&eval),
                    merit,
                    input: &eval.snapshot.input,
                    output: &eval.snapshot.output,
                };
                match self.observer.observe(&event) {
                    Some(Action::StopEarly) => Ok(TrialOutcome::Stop),
                    Some(Action::AssumeWorse) => Ok(TrialOutcome::Rejected),
                    None => Ok(TrialOutcome::Evaluated {
                        eval,
                        merit,
                        violation,
                    }),
                }
            }
            Err(e) => match Event::<M, P, N, C>::emit_failure(x, &e, &mut self.observer) {
                Some(Action::StopEarly) => Ok(TrialOutcome::Stop),
                Some(Action::AssumeWorse) => Ok(TrialOutcome::Rejected),
                None => Err(e.into()),
            },
        }
    }

    /// Reports an accepted step and returns the observer's action.
    pub(super) fn iterate(
        &mut self,
        iter: usize,
        eval: &Evaluation<M::Input, M::Output, N, C>,
        step: f64,
        slack: f64,
    ) -> Option<Action> {
        let event = Event::Iterate {
            iter,
            point: Point::from(eval),
            step,
            slack,
            input: &eval.snapshot.input,
            output: &eval.snapshot.output,
        };
        self.observer.observe(&event)
    }
}
