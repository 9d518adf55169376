use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::Features;

use super::Predictor;

/// One weight per feature.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureWeights {
    pub minimum_basket_spend: f64,
    pub points_value: f64,
    pub audience: f64,
}

impl FeatureWeights {
    /// Weights in [`Features::as_array`] order.
    #[must_use]
    pub fn as_array(&self) -> [f64; 3] {
        [self.minimum_basket_spend, self.points_value, self.audience]
    }
}

/// A linear rate model: `intercept + Σ wᵢ·featureᵢ`, optionally clipped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearRate {
    #[serde(default)]
    pub intercept: f64,

    #[serde(default)]
    pub coefficients: FeatureWeights,

    #[serde(default)]
    pub clip: bool,
}

impl Predictor for LinearRate {
    type Error = Infallible;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        let score = self
            .coefficients
            .as_array()
            .iter()
            .zip(features.as_array())
            .fold(self.intercept, |acc, (w, f)| acc + w * f);

        Ok(if self.clip { score.clamp(0.0, 1.0) } else { score })
    }
}
