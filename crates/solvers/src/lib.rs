//! Numerical solvers for bounded, constrained optimization problems.
//!
//! Solvers take a [`Model`] and a [`ConstrainedProblem`] describing how to map
//! solver variables to model inputs and how to score the outputs, plus an
//! [`Observer`] that can watch and steer the search.
//!
//! [`Model`]: promoptim_core::Model
//! [`ConstrainedProblem`]: promoptim_core::ConstrainedProblem
//! [`Observer`]: promoptim_core::Observer

pub mod optimization;
