use std::{
    fs,
    path::{Path, PathBuf},
};

use ninterp::error::ValidateError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Features;

use super::{
    AdditiveModel, AdditiveSpec, ConstantRate, LinearRate, PredictError, Predictor, TreeEnsemble,
};

/// Errors that can occur while loading a predictor.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid shape function for {feature}")]
    Shape {
        feature: &'static str,
        #[source]
        source: ValidateError,
    },
}

/// Chooses and parameterizes a predictor.
///
/// Deserializes from a table tagged by `kind`:
///
/// ```toml
/// kind = "tree_ensemble"
/// path = "model.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    /// [`ConstantRate`].
    Constant { rate: f64 },

    /// [`LinearRate`].
    Linear(LinearRate),

    /// [`AdditiveModel`].
    Additive(AdditiveSpec),

    /// [`TreeEnsemble`] read from a JSON file.
    TreeEnsemble {
        /// Relative paths resolve against the directory passed to [`ModelSpec::load`].
        path: PathBuf,
    },
}

impl ModelSpec {
    /// Builds the predictor this spec describes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if a model file cannot be read or parsed, or if
    /// the model's parameters are invalid.
    pub fn load(&self, base_dir: &Path) -> Result<LoadedModel, ModelError> {
        match self {
            Self::Constant { rate } => Ok(LoadedModel::Constant(ConstantRate::new(*rate))),
            Self::Linear(linear) => Ok(LoadedModel::Linear(*linear)),
            Self::Additive(spec) => AdditiveModel::new(spec).map(LoadedModel::Additive),
            Self::TreeEnsemble { path } => {
                let path = base_dir.join(path);
                let text = fs::read_to_string(&path).map_err(|source| ModelError::Io {
                    path: path.clone(),
                    source,
                })?;
                let ensemble = serde_json::from_str(&text)
                    .map_err(|source| ModelError::Json { path, source })?;
                Ok(LoadedModel::TreeEnsemble(ensemble))
            }
        }
    }
}

/// A predictor built from a [`ModelSpec`].
#[derive(Debug)]
pub enum LoadedModel {
    Constant(ConstantRate),
    Linear(LinearRate),
    Additive(AdditiveModel),
    TreeEnsemble(TreeEnsemble),
}

impl LoadedModel {
    /// Returns the spec `kind` this model was loaded from.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Linear(_) => "linear",
            Self::Additive(_) => "additive",
            Self::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

impl Predictor for LoadedModel {
    type Error = PredictError;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        let infallible = |result: Result<f64, std::convert::Infallible>| match result {
            Ok(rate) => rate,
            Err(never) => match never {},
        };

        match self {
            Self::Constant(model) => Ok(infallible(model.predict(features))),
            Self::Linear(model) => Ok(infallible(model.predict(features))),
            Self::Additive(model) => model.predict(features),
            Self::TreeEnsemble(model) => Ok(infallible(model.predict(features))),
        }
    }
}
