use serde::{Deserialize, Serialize};

/// Converts a promotion into its monetary cost.
///
/// Each redeemer costs `points_value / points_per_currency_unit`. Rates are
/// clipped at zero, so a negative prediction never yields a negative cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostModel {
    #[serde(default = "CostModel::default_points_per_currency_unit")]
    pub points_per_currency_unit: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            points_per_currency_unit: Self::default_points_per_currency_unit(),
        }
    }
}

impl CostModel {
    fn default_points_per_currency_unit() -> f64 {
        200.0
    }

    /// Returns true if the conversion rate is positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points_per_currency_unit.is_finite() && self.points_per_currency_unit > 0.0
    }

    #[must_use]
    pub fn cost_per_redeemer(&self, points_value: f64) -> f64 {
        points_value / self.points_per_currency_unit
    }

    /// Total promotion cost for `audience` customers redeeming at `rate`.
    #[must_use]
    pub fn total_cost(&self, points_value: f64, audience: f64, rate: f64) -> f64 {
        self.cost_per_redeemer(points_value) * redeemers(audience, rate)
    }
}

/// Expected number of redeemers, with negative rates clipped to zero.
#[must_use]
pub fn redeemers(audience: f64, rate: f64) -> f64 {
    audience * rate.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn default_conversion() {
        let cost = CostModel::default();
        assert_relative_eq!(cost.cost_per_redeemer(1000.0), 5.0);
        assert_relative_eq!(cost.total_cost(1000.0, 500_000.0, 0.05), 125_000.0);
    }

    #[test]
    fn negative_rates_cost_nothing() {
        let cost = CostModel::default();
        assert_eq!(cost.total_cost(3000.0, 2_000_000.0, -0.3), 0.0);
        assert_eq!(redeemers(2_000_000.0, -0.3), 0.0);
    }

    #[test]
    fn rejects_non_positive_conversion() {
        assert!(CostModel::default().is_valid());
        assert!(
            !CostModel {
                points_per_currency_unit: 0.0
            }
            .is_valid()
        );
        assert!(
            !CostModel {
                points_per_currency_unit: f64::INFINITY
            }
            .is_valid()
        );
    }

    proptest! {
        #[test]
        fn cost_is_never_negative(
            points in 100.0..=3000.0_f64,
            audience in 100_000.0..=2_000_000.0_f64,
            rate in -10.0..10.0_f64,
        ) {
            let cost = CostModel::default().total_cost(points, audience, rate);
            prop_assert!(cost >= 0.0);
        }
    }
}
