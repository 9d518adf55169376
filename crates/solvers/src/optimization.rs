//! Solvers for constrained optimization problems.
//!
//! A [`ConstrainedProblem`] maps solver variables `x: [f64; N]` to model
//! inputs, calls the model, and extracts a scalar objective along with `C`
//! inequality constraints. Solvers in this module search a bounded box for the
//! `x` that minimizes the objective while keeping every constraint `>= 0`.
//!
//! # Solvers
//!
//! - [`sqp`] — sequential quadratic programming with finite-difference
//!   gradients and a damped BFGS Hessian
//!
//! [`ConstrainedProblem`]: promoptim_core::ConstrainedProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod sqp;
