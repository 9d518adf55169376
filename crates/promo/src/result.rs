use std::fmt;

use serde::{Deserialize, Serialize};

use promoptim_solvers::optimization::sqp;

use crate::PromotionParams;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Converged,
    MaxIters,
    LineSearchStalled,
    StoppedByObserver,
}

impl SolverStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::MaxIters => "max_iters",
            Self::LineSearchStalled => "line_search_stalled",
            Self::StoppedByObserver => "stopped_by_observer",
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<sqp::Status> for SolverStatus {
    fn from(status: sqp::Status) -> Self {
        match status {
            sqp::Status::Converged => Self::Converged,
            sqp::Status::MaxIters => Self::MaxIters,
            sqp::Status::LineSearchStalled => Self::LineSearchStalled,
            sqp::Status::StoppedByObserver => Self::StoppedByObserver,
        }
    }
}

/// The promotion chosen by [`optimize`](crate::optimize) and its predicted outcome.
///
/// Rate, redeemers and cost come from a fresh predictor call at the reported
/// parameters. `predicted_rate` is the raw prediction; redeemers and cost
/// use the rate clipped at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub points_value: f64,
    pub minimum_basket_spend: f64,
    pub audience: f64,
    pub predicted_rate: f64,
    pub predicted_redeemers: f64,
    pub predicted_cost: f64,

    /// Objective at the reported parameters (negated redeemers plus penalties).
    pub objective: f64,

    pub budget: f64,
    pub status: SolverStatus,

    /// Accepted solver steps.
    pub iters: usize,

    /// Predictor calls made during the search.
    pub evals: usize,
}

impl OptimizationResult {
    #[must_use]
    pub fn params(&self) -> PromotionParams {
        PromotionParams::new(self.points_value, self.minimum_basket_spend, self.audience)
    }

    /// Budget left unspent (negative if over budget).
    #[must_use]
    pub fn budget_slack(&self) -> f64 {
        self.budget - self.predicted_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_match_serde() {
        for status in [
            SolverStatus::Converged,
            SolverStatus::MaxIters,
            SolverStatus::LineSearchStalled,
            SolverStatus::StoppedByObserver,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn budget_slack_is_unspent_budget() {
        let mut result = OptimizationResult {
            points_value: 100.0,
            minimum_basket_spend: 50.0,
            audience: 1e6,
            predicted_rate: 0.05,
            predicted_redeemers: 5e4,
            predicted_cost: 24_000.0,
            objective: -5e4,
            budget: 25_000.0,
            status: SolverStatus::Converged,
            iters: 4,
            evals: 20,
        };
        assert_eq!(result.budget_slack(), 1000.0);
        assert_eq!(result.params(), PromotionParams::new(100.0, 50.0, 1e6));

        result.predicted_cost = 26_000.0;
        assert_eq!(result.budget_slack(), -1000.0);
    }
}
