//! Reusable observers for promoptim solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! let observers work with solver events without naming solver types.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasObjective`], [`HasViolation`], [`CanStopEarly`], [`CanAssumeWorse`])
//! - [`TraceObserver`] — Reports solver progress through `tracing`
//!
//! [`Observer`]: promoptim_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`HasViolation`]: traits::HasViolation
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CanAssumeWorse`]: traits::CanAssumeWorse

mod trace;
pub mod traits;

pub use trace::TraceObserver;
