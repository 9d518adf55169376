//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once against the capabilities it needs.
//!
//! # Event traits
//!
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasViolation`] — events that carry a constraint violation
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//! - [`CanAssumeWorse`] — actions that can reject an evaluated point
//!
//! # Example
//!
//! ```rust
//! use promoptim_core::Observer;
//! use promoptim_observers::traits::{CanStopEarly, HasObjective, HasViolation};
//!
//! /// Stops once a feasible point beats a target objective.
//! struct GoodEnough {
//!     target: f64,
//!     tolerance: f64,
//! }
//!
//! impl<E: HasObjective + HasViolation, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         if event.violation() <= self.tolerance && event.objective() <= self.target {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use promoptim_core::{ConstrainedProblem, Model};

use promoptim_solvers::optimization::sqp;

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    ///
    /// Returns `f64::NAN` when the event represents an error and no objective
    /// is available.
    fn objective(&self) -> f64;
}

/// An event that carries a constraint violation.
pub trait HasViolation {
    /// Returns the largest constraint violation for this event, or zero when
    /// every constraint is satisfied.
    ///
    /// Returns `f64::NAN` when the event represents an error and no
    /// constraint values are available.
    fn violation(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

/// An action type that can signal a worse-than-evaluated outcome.
pub trait CanAssumeWorse {
    /// Returns the action that rejects the evaluated point.
    fn assume_worse() -> Self;
}

// --- sqp::Event ---

impl<M, P, const N: usize, const C: usize> HasObjective for sqp::Event<'_, M, P, N, C>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    fn objective(&self) -> f64 {
        self.point().map_or(f64::NAN, |point| point.objective)
    }
}

impl<M, P, const N: usize, const C: usize> HasViolation for sqp::Event<'_, M, P, N, C>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    fn violation(&self) -> f64 {
        self.point().map_or(f64::NAN, |point| point.max_violation())
    }
}

// --- sqp::Action ---

impl CanStopEarly for sqp::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanAssumeWorse for sqp::Action {
    fn assume_worse() -> Self {
        Self::AssumeWorse
    }
}
