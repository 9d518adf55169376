use promoptim_core::{Bounds, ConstrainedProblem, Model, Observer};

use super::{
    Action, Config, Error, Event, Solution, Status,
    best::Best,
    eval_context::{EvalContext, Interrupt, TrialOutcome},
    hessian::Hessian,
    iterate::Iterate,
    linalg::{dot, inf_norm},
    point::max_violation,
    qp::Subproblem,
    scaling::Scaling,
};

/// Sufficient-decrease fraction for the merit line search.
const ARMIJO: f64 = 1e-4;

/// Margin added to the multiplier sum when raising the merit penalty.
const PENALTY_MARGIN: f64 = 1e-6;

/// Core SQP iteration.
pub(super) fn search<M, P, Obs, const N: usize, const C: usize>(
    model: &M,
    problem: &P,
    bounds: &Bounds<N>,
    initial: [f64; N],
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output, N, C>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P, N, C>, Action>,
{
    if !bounds.contains(&initial) {
        return Err(Error::InitialOutOfBounds {
            x: initial.to_vec(),
        });
    }

    let tol = config.feasibility_tol();
    let fixed = bounds.widths().map(|w| w <= 0.0);
    let mut ctx = EvalContext::new(model, problem, bounds, observer);

    let u = bounds.normalize(&initial);
    let eval = ctx.initial(initial)?;
    let raw = match ctx.gradients(&u, &eval, config.fd_step(), &fixed) {
        Ok(raw) => raw,
        Err(Interrupt::Stop) => {
            let violation = max_violation(&eval.constraints);
            let best = Best::new(eval, violation, tol);
            return Ok(best.finish(Status::StoppedByObserver, 0, ctx.evals()));
        }
        Err(Interrupt::Fail(error)) => return Err(error),
    };

    let scaling = Scaling::new(eval.objective, &eval.constraints, &raw);
    let mut current = Iterate::new(u, eval, &raw, &scaling);
    let mut best = Best::new(current.eval.clone(), current.violation(), tol);
    let mut hessian = Hessian::<N>::identity();
    let mut penalty = 1.0_f64;

    for iter in 1..=config.max_iters() {
        let subproblem = Subproblem {
            room_down: std::array::from_fn(|j| if fixed[j] { 0.0 } else { current.u[j] }),
            room_up: std::array::from_fn(|j| if fixed[j] { 0.0 } else { 1.0 - current.u[j] }),
            gradient: &current.gradients.objective,
            constraints: &current.constraints,
            jacobian: &current.gradients.constraints,
            hessian: hessian.matrix(),
            elastic_weight: config.elastic_weight(),
        };
        let Some(step) = subproblem.solve() else {
            return Ok(best.finish(Status::LineSearchStalled, iter - 1, ctx.evals()));
        };

        let multiplier_sum: f64 = step.multipliers.iter().sum();
        penalty = penalty.max(1.5 * multiplier_sum + PENALTY_MARGIN);

        let merit = current.merit(penalty);
        let slope = (dot(&current.gradients.objective, &step.d)
            + penalty * (current.linearized_violation(&step.d) - current.violation()))
        .min(0.0);

        let stationary = inf_norm(&step.d) <= config.x_tol();
        let flat = current.violation() <= tol
            && -slope <= config.f_tol() * (1.0 + current.objective.abs());
        if stationary || flat {
            return Ok(best.finish(Status::Converged, iter - 1, ctx.evals()));
        }

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..=config.max_backtracks() {
            let trial: [f64; N] =
                std::array::from_fn(|j| (current.u[j] + alpha * step.d[j]).clamp(0.0, 1.0));

            match ctx.trial(iter, alpha, &trial, &scaling, penalty)? {
                TrialOutcome::Evaluated {
                    eval,
                    merit: trial_merit,
                    violation,
                } => {
                    best.update(eval.clone(), violation, tol);
                    if trial_merit <= merit + ARMIJO * alpha * slope {
                        accepted = Some((trial, eval));
                        break;
                    }
                }
                TrialOutcome::Rejected => {}
                TrialOutcome::Stop => {
                    return Ok(best.finish(Status::StoppedByObserver, iter, ctx.evals()));
                }
            }
            alpha *= 0.5;
        }

        let Some((u, eval)) = accepted else {
            return Ok(best.finish(Status::LineSearchStalled, iter, ctx.evals()));
        };

        let raw = match ctx.gradients(&u, &eval, config.fd_step(), &fixed) {
            Ok(raw) => raw,
            Err(Interrupt::Stop) => {
                return Ok(best.finish(Status::StoppedByObserver, iter, ctx.evals()));
            }
            Err(Interrupt::Fail(error)) => return Err(error),
        };
        let next = Iterate::new(u, eval, &raw, &scaling);

        let s: [f64; N] = std::array::from_fn(|j| next.u[j] - current.u[j]);
        let old = current.lagrangian_gradient(&step.multipliers);
        let new = next.lagrangian_gradient(&step.multipliers);
        let y: [f64; N] = std::array::from_fn(|j| new[j] - old[j]);
        hessian.update(&s, &y);

        current = next;
        let step_length = inf_norm(&s);

        let action = ctx.iterate(iter, &current.eval, step_length, step.slack);
        if let Some(Action::StopEarly) = action {
            return Ok(best.finish(Status::StoppedByObserver, iter, ctx.evals()));
        }

        if step_length <= config.x_tol() && current.violation() <= tol {
            return Ok(best.finish(Status::Converged, iter, ctx.evals()));
        }
    }

    Ok(best.finish(Status::MaxIters, config.max_iters(), ctx.evals()))
}
