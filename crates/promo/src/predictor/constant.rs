use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::Features;

use super::Predictor;

/// Predicts the same rate for every promotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantRate {
    pub rate: f64,
}

impl ConstantRate {
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Predictor for ConstantRate {
    type Error = Infallible;

    fn predict(&self, _features: &Features) -> Result<f64, Self::Error> {
        Ok(self.rate)
    }
}

/// Adapts a plain function or closure into a [`Predictor`].
#[derive(Debug, Clone, Copy)]
pub struct FnPredictor<F>(pub F);

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&Features) -> f64,
{
    type Error = Infallible;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        Ok((self.0)(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::PromotionParams;

    #[test]
    fn closures_become_predictors() {
        let predictor = FnPredictor(|f: &Features| f.points_value / 10_000.0);
        let features = PromotionParams::new(500.0, 50.0, 1e5).features();

        assert_eq!(predictor.predict(&features), Ok(0.05));
        assert_eq!(ConstantRate::new(0.2).predict(&features), Ok(0.2));
    }
}
