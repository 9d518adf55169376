use serde::{Deserialize, Serialize};

use promoptim_core::{Bounds, BoundsError};

/// A candidate promotion: the three parameters the optimizer chooses.
///
/// As a solver vector the order is `[points_value, minimum_basket_spend,
/// audience]`. Predictors see a different order; see [`Features`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionParams {
    /// Reward value granted per redemption, in points.
    pub points_value: f64,

    /// Purchase threshold a customer must meet to qualify.
    pub minimum_basket_spend: f64,

    /// Number of customers targeted.
    pub audience: f64,
}

impl Default for PromotionParams {
    fn default() -> Self {
        Self {
            points_value: 1000.0,
            minimum_basket_spend: 50.0,
            audience: 500_000.0,
        }
    }
}

impl PromotionParams {
    #[must_use]
    pub fn new(points_value: f64, minimum_basket_spend: f64, audience: f64) -> Self {
        Self {
            points_value,
            minimum_basket_spend,
            audience,
        }
    }

    /// Returns the solver vector `[points_value, minimum_basket_spend, audience]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.points_value, self.minimum_basket_spend, self.audience]
    }

    /// Builds parameters from a solver vector.
    #[must_use]
    pub fn from_array(x: [f64; 3]) -> Self {
        Self::new(x[0], x[1], x[2])
    }

    /// Returns the predictor features for these parameters.
    #[must_use]
    pub fn features(&self) -> Features {
        Features {
            minimum_basket_spend: self.minimum_basket_spend,
            points_value: self.points_value,
            audience: self.audience,
        }
    }
}

/// The predictor's view of a promotion.
///
/// [`Features::as_array`] fixes the order every predictor is trained on:
/// `[minimum_basket_spend, points_value, audience]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub minimum_basket_spend: f64,
    pub points_value: f64,
    pub audience: f64,
}

impl Features {
    /// Index of `minimum_basket_spend` in [`Features::as_array`].
    pub const MINIMUM_BASKET_SPEND: usize = 0;

    /// Index of `points_value` in [`Features::as_array`].
    pub const POINTS_VALUE: usize = 1;

    /// Index of `audience` in [`Features::as_array`].
    pub const AUDIENCE: usize = 2;

    /// Feature names in array order.
    pub const NAMES: [&'static str; 3] = ["minimum_basket_spend", "points_value", "audience"];

    #[must_use]
    pub fn as_array(&self) -> [f64; 3] {
        [self.minimum_basket_spend, self.points_value, self.audience]
    }
}

/// Search ranges for each promotion parameter, as inclusive `(min, max)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamBounds {
    #[serde(default = "ParamBounds::default_points_value")]
    pub points_value: (f64, f64),

    #[serde(default = "ParamBounds::default_minimum_basket_spend")]
    pub minimum_basket_spend: (f64, f64),

    #[serde(default = "ParamBounds::default_audience")]
    pub audience: (f64, f64),
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self {
            points_value: Self::default_points_value(),
            minimum_basket_spend: Self::default_minimum_basket_spend(),
            audience: Self::default_audience(),
        }
    }
}

impl ParamBounds {
    fn default_points_value() -> (f64, f64) {
        (100.0, 3000.0)
    }

    fn default_minimum_basket_spend() -> (f64, f64) {
        (50.0, 500.0)
    }

    fn default_audience() -> (f64, f64) {
        (100_000.0, 2_000_000.0)
    }

    /// Converts to solver bounds in `[points_value, minimum_basket_spend, audience]` order.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if any pair is non-finite or has `min > max`.
    pub fn to_bounds(&self) -> Result<Bounds<3>, BoundsError> {
        Bounds::new([self.points_value, self.minimum_basket_spend, self.audience])
    }

    /// Returns true if every parameter lies within its range.
    #[must_use]
    pub fn contains(&self, params: &PromotionParams) -> bool {
        let within = |(lo, hi): (f64, f64), v: f64| lo <= v && v <= hi;
        within(self.points_value, params.points_value)
            && within(self.minimum_basket_spend, params.minimum_basket_spend)
            && within(self.audience, params.audience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_use_predictor_order() {
        let params = PromotionParams::new(1500.0, 75.0, 250_000.0);
        let features = params.features().as_array();

        assert_eq!(features[Features::MINIMUM_BASKET_SPEND], 75.0);
        assert_eq!(features[Features::POINTS_VALUE], 1500.0);
        assert_eq!(features[Features::AUDIENCE], 250_000.0);
    }

    #[test]
    fn solver_vector_round_trips() {
        let params = PromotionParams::new(1500.0, 75.0, 250_000.0);
        assert_eq!(PromotionParams::from_array(params.to_array()), params);
    }

    #[test]
    fn default_bounds_contain_default_guess() {
        let bounds = ParamBounds::default();
        assert!(bounds.contains(&PromotionParams::default()));
        assert!(!bounds.contains(&PromotionParams::new(50.0, 100.0, 500_000.0)));
        assert!(!bounds.contains(&PromotionParams::new(f64::NAN, 100.0, 500_000.0)));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let bounds = ParamBounds {
            audience: (2_000_000.0, 100_000.0),
            ..ParamBounds::default()
        };
        assert!(matches!(
            bounds.to_bounds(),
            Err(BoundsError::Inverted { index: 2, .. })
        ));
    }
}
