//! Core traits and types for promotion optimization.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! domain models build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`Bounds`] — a validated box of lower/upper limits on solver variables
//! - [`ConstrainedProblem`] — adapts solver variables to model inputs and
//!   extracts an objective and inequality constraints from model outputs

mod bounds;
mod model;
mod observer;
mod problems;

pub use bounds::{Bounds, BoundsError};
pub use observer::Observer;
pub use problems::ConstrainedProblem;
pub use {model::Model, model::Snapshot};
