use ndarray::Array1;
use ninterp::{
    error::InterpolateError,
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Features;

use super::{Link, ModelError, Predictor};

/// Errors raised while evaluating a loaded model.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("shape function for {feature} could not be evaluated")]
    Shape {
        feature: &'static str,
        #[source]
        source: InterpolateError,
    },
}

/// Knots and values of a piecewise-linear shape function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeSpec {
    /// Strictly increasing feature values.
    pub knots: Vec<f64>,

    /// Contribution to the score at each knot.
    pub values: Vec<f64>,
}

/// Serializable description of an [`AdditiveModel`].
///
/// A missing shape contributes nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditiveSpec {
    #[serde(default)]
    pub intercept: f64,

    #[serde(default)]
    pub link: Link,

    #[serde(default)]
    pub minimum_basket_spend: Option<ShapeSpec>,

    #[serde(default)]
    pub points_value: Option<ShapeSpec>,

    #[serde(default)]
    pub audience: Option<ShapeSpec>,
}

/// A generalized additive model: `link(intercept + Σ sᵢ(featureᵢ))`.
///
/// Each `sᵢ` interpolates linearly between knots and holds its end value
/// beyond the outermost knots.
#[derive(Debug)]
pub struct AdditiveModel {
    intercept: f64,
    link: Link,
    shapes: [Option<Interp1DOwned<f64, Linear>>; 3],
}

impl AdditiveModel {
    /// Builds the model from its description.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] if a shape's knots and values do not form
    /// a valid interpolation grid.
    pub fn new(spec: &AdditiveSpec) -> Result<Self, ModelError> {
        let shapes = [
            &spec.minimum_basket_spend,
            &spec.points_value,
            &spec.audience,
        ];

        let mut built: [Option<Interp1DOwned<f64, Linear>>; 3] = [None, None, None];
        for (index, shape) in shapes.into_iter().enumerate() {
            let Some(shape) = shape else { continue };
            let interp = Interp1DOwned::new(
                Array1::from(shape.knots.clone()),
                Array1::from(shape.values.clone()),
                Linear,
                Extrapolate::Clamp,
            )
            .map_err(|source| ModelError::Shape {
                feature: Features::NAMES[index],
                source,
            })?;
            built[index] = Some(interp);
        }

        Ok(Self {
            intercept: spec.intercept,
            link: spec.link,
            shapes: built,
        })
    }
}

impl Predictor for AdditiveModel {
    type Error = PredictError;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        let mut score = self.intercept;
        for (index, value) in features.as_array().into_iter().enumerate() {
            if let Some(shape) = &self.shapes[index] {
                score += shape
                    .interpolate(&[value])
                    .map_err(|source| PredictError::Shape {
                        feature: Features::NAMES[index],
                        source,
                    })?;
            }
        }
        Ok(self.link.apply(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::PromotionParams;

    fn spec() -> AdditiveSpec {
        AdditiveSpec {
            intercept: 0.01,
            link: Link::Identity,
            minimum_basket_spend: Some(ShapeSpec {
                knots: vec![50.0, 500.0],
                values: vec![0.0, -0.02],
            }),
            points_value: Some(ShapeSpec {
                knots: vec![100.0, 1000.0, 3000.0],
                values: vec![0.0, 0.04, 0.05],
            }),
            audience: None,
        }
    }

    #[test]
    fn sums_interpolated_shapes() {
        let model = AdditiveModel::new(&spec()).unwrap();

        // 0.01 + (-0.01 at spend 275) + (0.02 at points 550).
        let rate = model
            .predict(&PromotionParams::new(550.0, 275.0, 1e6).features())
            .unwrap();
        assert_relative_eq!(rate, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn holds_end_values_outside_knots() {
        let model = AdditiveModel::new(&spec()).unwrap();

        let rate = model
            .predict(&PromotionParams::new(5000.0, 10.0, 1e6).features())
            .unwrap();
        assert_relative_eq!(rate, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn logistic_link_maps_score() {
        let model = AdditiveModel::new(&AdditiveSpec {
            link: Link::Logistic,
            intercept: 0.0,
            ..AdditiveSpec::default()
        })
        .unwrap();

        let rate = model.predict(&PromotionParams::default().features()).unwrap();
        assert_relative_eq!(rate, 0.5);
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let mut bad = spec();
        bad.points_value = Some(ShapeSpec {
            knots: vec![100.0, 3000.0],
            values: vec![0.0],
        });

        let err = AdditiveModel::new(&bad).err().expect("invalid shape");
        assert!(matches!(
            err,
            ModelError::Shape {
                feature: "points_value",
                ..
            }
        ));
    }
}
