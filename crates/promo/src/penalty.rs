use serde::{Deserialize, Serialize};

use crate::Features;

/// Magnitude of each sign penalty added to the objective.
pub const SIGN_PENALTY: f64 = 1000.0;

/// How to penalize predictions whose sign disagrees with domain expectations.
///
/// The expectation is that the rate rises with `points_value` and falls with
/// `minimum_basket_spend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPenalty {
    /// Adds [`SIGN_PENALTY`] when `points_value > 0` and the rate is
    /// negative, and again when `minimum_basket_spend > 0` and the rate is
    /// positive.
    ///
    /// This is the historical rule. The second term is constant over any
    /// region where the rate stays positive.
    #[default]
    AsObserved,

    /// No penalty.
    Disabled,
}

impl SignPenalty {
    /// Returns the total penalty for a prediction.
    #[must_use]
    pub fn penalty(self, features: &Features, rate: f64) -> f64 {
        match self {
            Self::Disabled => 0.0,
            Self::AsObserved => {
                let mut total = 0.0;
                if features.points_value > 0.0 && rate < 0.0 {
                    total += SIGN_PENALTY;
                }
                if features.minimum_basket_spend > 0.0 && rate > 0.0 {
                    total += SIGN_PENALTY;
                }
                total
            }
        }
    }
}
