//! Budget-constrained optimization of retail promotion parameters.
//!
//! A promotion is described by [`PromotionParams`]: the points value of the
//! reward, the minimum basket spend to qualify, and the audience size. Given
//! a [`Predictor`](predictor::Predictor) of the redemption rate, [`optimize`]
//! searches the [`ParamBounds`] for the promotion that maximizes predicted
//! redeemers while its cost stays within a budget.
//!
//! # Example
//!
//! ```
//! use promoptim::{
//!     OptimizeOptions, ParamBounds, PromotionParams, optimize, predictor::ConstantRate,
//! };
//!
//! let result = optimize(
//!     &ConstantRate::new(0.05),
//!     25_000.0,
//!     &ParamBounds::default(),
//!     &PromotionParams::default(),
//!     &OptimizeOptions::default(),
//! )?;
//!
//! assert!(result.predicted_cost <= 25_000.0 * 1.000_001);
//! # Ok::<(), promoptim::OptimizeError>(())
//! ```
//!
//! The `promoptim` binary drives the same pipeline from a TOML file; see
//! [`RunConfig`].

mod config;
mod cost;
mod error;
mod export;
mod optimizer;
mod params;
mod penalty;
pub mod predictor;
pub mod problem;
mod result;

pub use config::{ConfigError, RunConfig, SolverSettings};
pub use cost::{CostModel, redeemers};
pub use error::OptimizeError;
pub use export::{
    ExportError, GridRow, prediction_grid, write_grid_csv, write_result_csv, write_result_json,
};
pub use optimizer::{BUDGET_TOLERANCE, OptimizeOptions, optimize};
pub use params::{Features, ParamBounds, PromotionParams};
pub use penalty::{SIGN_PENALTY, SignPenalty};
pub use result::{OptimizationResult, SolverStatus};
