//! Redemption-rate predictors.
//!
//! The optimizer only needs [`Predictor`]: given [`Features`], return a rate.
//! The concrete predictors here cover the model families used for promotion
//! response (linear, additive, boosted trees), plus simple adapters for tests
//! and scripting. [`ModelSpec`] selects one from configuration.

mod additive;
mod constant;
mod link;
mod linear;
mod spec;
mod tree;

pub use additive::{AdditiveModel, AdditiveSpec, PredictError, ShapeSpec};
pub use constant::{ConstantRate, FnPredictor};
pub use link::Link;
pub use linear::{FeatureWeights, LinearRate};
pub use spec::{LoadedModel, ModelError, ModelSpec};
pub use tree::{Node, Tree, TreeEnsemble, TreeError};

use crate::Features;

/// Predicts the fraction of a targeted audience that will redeem.
///
/// Outputs are nominally in `[0, 1]` but are not trusted; callers clip where
/// it matters. Implementations must be deterministic: the same features
/// always produce the same rate, with no memoization across calls.
pub trait Predictor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Predicts the redemption rate for one promotion.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the prediction cannot be made.
    fn predict(&self, features: &Features) -> Result<f64, Self::Error>;
}

impl<T: Predictor + ?Sized> Predictor for &T {
    type Error = T::Error;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        (**self).predict(features)
    }
}

impl<T: Predictor + ?Sized> Predictor for Box<T> {
    type Error = T::Error;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        (**self).predict(features)
    }
}
