use std::error::Error as StdError;

use thiserror::Error;

use promoptim_core::BoundsError;
use promoptim_solvers::optimization::sqp;

use crate::{OptimizationResult, PromotionParams};

/// Errors that can occur when optimizing a promotion.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("budget must be positive and finite, got {budget}")]
    InvalidBudget { budget: f64 },

    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("points_per_currency_unit must be positive and finite, got {0}")]
    InvalidCostModel(f64),

    #[error("initial guess {guess:?} lies outside the bounds")]
    InitialGuessOutOfBounds { guess: PromotionParams },

    /// The best point found still exceeds the budget.
    #[error("no promotion within bounds meets the budget: best cost {cost} exceeds {budget}")]
    Infeasible {
        cost: f64,
        budget: f64,
        best: Box<OptimizationResult>,
    },

    #[error("predictor error: {0}")]
    Predictor(#[source] Box<dyn StdError + Send + Sync>),

    #[error("predictor returned a non-finite rate {rate} at the solution")]
    NonFiniteRate { rate: f64 },

    #[error("solver error: {0}")]
    Solver(#[source] sqp::Error),
}

impl From<sqp::Error> for OptimizeError {
    fn from(err: sqp::Error) -> Self {
        match err {
            sqp::Error::Model(e) => Self::Predictor(e),
            other => Self::Solver(other),
        }
    }
}
