//! Sequential quadratic programming for bounded, constrained minimization.
//!
//! # Algorithm
//!
//! Each iteration builds a quadratic model of the objective and a linear
//! model of every constraint around the current point, solves that QP
//! subproblem exactly, and takes a damped step along its solution:
//!
//! 1. Variables are mapped into the unit box using the [`Bounds`]; the
//!    objective and constraints are divided by the size of their gradients at
//!    the initial point. All internal tolerances refer to these units.
//! 2. Gradients come from forward finite differences, switching to backward
//!    differences at the upper bound so no probe leaves the box.
//! 3. The QP subproblem carries an elastic slack `t`, so it stays feasible
//!    even when the linearized constraints cannot be met inside the box:
//!
//!    ```text
//!    minimize    ½ dᵀBd + gᵀd + ρₑ·t + ½t²
//!    subject to  c + J·d + t ≥ 0,   t ≥ 0,   lower ≤ u + d ≤ upper
//!    ```
//!
//! 4. A backtracking line search on the merit `f + ρ·max(0, −min cᵢ)`
//!    accepts the step.
//! 5. `B` is updated with Powell's damped BFGS formula on the gradient of the
//!    Lagrangian, which keeps it positive definite.
//!
//! # When to Use
//!
//! - Few variables (the QP is solved by enumerating active sets)
//! - Smooth or mostly smooth objective and constraints
//! - Every model call must stay inside a known box
//!
//! # Limitations
//!
//! - **Local**: converges to a local minimum that depends on the initial point
//! - **Finite differences**: piecewise-constant models (e.g. tree ensembles)
//!   produce zero gradients on flat regions
//! - **Small problems**: QP cost grows combinatorially with `N` and `C`
//!
//! # Observer Events
//!
//! - [`Event::Trial`] — a line-search trial point was evaluated
//! - [`Event::Iterate`] — a step was accepted
//! - [`Event::ModelFailed`] / [`Event::ProblemFailed`] — an evaluation failed
//!
//! Observers can return [`Action::StopEarly`] to halt with the best point found
//! so far, or [`Action::AssumeWorse`] on a trial (successful or failed) to
//! reject it and keep backtracking.

mod action;
mod best;
mod config;
mod error;
mod eval_context;
mod event;
mod gradient;
mod hessian;
mod iterate;
mod linalg;
mod point;
mod qp;
mod scaling;
mod search;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use point::Point;
pub use solution::{Solution, Status};

use promoptim_core::{Bounds, ConstrainedProblem, Model, Observer};

use search::search;

/// Finds a constrained minimum of the objective using SQP, starting from `initial`.
///
/// The model is only ever called with inputs built from points inside `bounds`.
/// See the [module docs](self) for details on events and observer actions.
///
/// # Errors
///
/// Returns an error if `initial` lies outside `bounds`, or if the model or
/// problem fails during evaluation and the observer does not recover.
pub fn minimize<M, P, Obs, const N: usize, const C: usize>(
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
    search(model, problem, bounds, initial, config, observer)
}

/// Finds a constrained minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if `initial` lies outside `bounds`, or if the model or
/// problem fails during evaluation.
pub fn minimize_unobserved<M, P, const N: usize, const C: usize>(
    model: &M,
    problem: &P,
    bounds: &Bounds<N>,
    initial: [f64; N],
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N, C>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, bounds, initial, config, ())
}
