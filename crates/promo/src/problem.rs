use thiserror::Error;

use promoptim_core::{ConstrainedProblem, Model};

use crate::{CostModel, Features, PromotionParams, SignPenalty, predictor::Predictor};

/// Adapts a [`Predictor`] to the solver's [`Model`] interface.
pub struct RateModel<'p, P> {
    predictor: &'p P,
}

impl<'p, P: Predictor> RateModel<'p, P> {
    #[must_use]
    pub fn new(predictor: &'p P) -> Self {
        Self { predictor }
    }
}

impl<P: Predictor> Model for RateModel<'_, P> {
    type Input = Features;
    type Output = f64;
    type Error = P::Error;

    fn call(&self, input: &Features) -> Result<f64, Self::Error> {
        self.predictor.predict(input)
    }
}

/// Errors raised while scoring a prediction.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProblemError {
    #[error("predictor returned a non-finite rate {rate} for {features:?}")]
    NonFiniteRate { rate: f64, features: Features },
}

/// Maximize redeemers subject to the budget, as a minimization problem.
///
/// Variables are `[points_value, minimum_basket_spend, audience]`. The
/// objective is `-(audience · rate)` plus sign penalties, and the single
/// constraint is `budget - total_cost >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromotionProblem {
    budget: f64,
    cost: CostModel,
    penalty: SignPenalty,
}

impl PromotionProblem {
    #[must_use]
    pub fn new(budget: f64, cost: CostModel, penalty: SignPenalty) -> Self {
        Self {
            budget,
            cost,
            penalty,
        }
    }

    /// Objective value for a prediction, before any finiteness check.
    #[must_use]
    pub fn objective_value(&self, features: &Features, rate: f64) -> f64 {
        -(features.audience * rate) + self.penalty.penalty(features, rate)
    }

    /// Remaining budget after paying for a prediction.
    #[must_use]
    pub fn budget_slack(&self, features: &Features, rate: f64) -> f64 {
        self.budget
            - self
                .cost
                .total_cost(features.points_value, features.audience, rate)
    }
}

fn finite(features: &Features, rate: f64) -> Result<f64, ProblemError> {
    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(ProblemError::NonFiniteRate {
            rate,
            features: *features,
        })
    }
}

impl ConstrainedProblem<3, 1> for PromotionProblem {
    type Input = Features;
    type Output = f64;
    type Error = ProblemError;

    fn input(&self, x: &[f64; 3]) -> Result<Self::Input, Self::Error> {
        Ok(PromotionParams::from_array(*x).features())
    }

    fn objective(&self, input: &Features, output: &f64) -> Result<f64, Self::Error> {
        let rate = finite(input, *output)?;
        Ok(self.objective_value(input, rate))
    }

    fn constraints(&self, input: &Features, output: &f64) -> Result<[f64; 1], Self::Error> {
        let rate = finite(input, *output)?;
        Ok([self.budget_slack(input, rate)])
    }
}
