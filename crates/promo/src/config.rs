//! TOML run configuration for the `promoptim` binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use promoptim_solvers::optimization::sqp;

use crate::{
    CostModel, OptimizeOptions, ParamBounds, PromotionParams, SignPenalty,
    predictor::{LoadedModel, ModelError, ModelSpec},
};

/// Errors that can occur while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid solver settings: {0}")]
    Solver(#[from] sqp::ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Solver settings as written in a config file.
///
/// Missing fields take the values of [`sqp::Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub max_iters: usize,
    pub max_backtracks: usize,
    pub x_tol: f64,
    pub f_tol: f64,
    pub feasibility_tol: f64,
    pub fd_step: f64,
    pub elastic_weight: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let config = sqp::Config::default();
        Self {
            max_iters: config.max_iters(),
            max_backtracks: config.max_backtracks(),
            x_tol: config.x_tol(),
            f_tol: config.f_tol(),
            feasibility_tol: config.feasibility_tol(),
            fd_step: config.fd_step(),
            elastic_weight: config.elastic_weight(),
        }
    }
}

impl SolverSettings {
    /// Validates the settings into a solver config.
    ///
    /// # Errors
    ///
    /// Returns [`sqp::ConfigError`] if any tolerance is out of range.
    pub fn to_config(&self) -> Result<sqp::Config, sqp::ConfigError> {
        sqp::Config::new(
            self.max_iters,
            self.max_backtracks,
            self.x_tol,
            self.f_tol,
            self.feasibility_tol,
            self.fd_step,
            self.elastic_weight,
        )
    }
}

/// Everything needed for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub budget: f64,

    #[serde(default)]
    pub penalty: SignPenalty,

    #[serde(default)]
    pub bounds: ParamBounds,

    #[serde(default)]
    pub initial_guess: PromotionParams,

    #[serde(default)]
    pub cost: CostModel,

    #[serde(default)]
    pub solver: SolverSettings,

    pub model: ModelSpec,
}

impl RunConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the optimizer options for this run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Solver`] if the solver settings are invalid.
    pub fn options(&self) -> Result<OptimizeOptions, ConfigError> {
        Ok(OptimizeOptions {
            cost: self.cost,
            penalty: self.penalty,
            solver: self.solver.to_config()?,
        })
    }

    /// Loads the configured predictor, resolving model files against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Model`] if the predictor cannot be built.
    pub fn load_model(&self, base_dir: &Path) -> Result<LoadedModel, ConfigError> {
        Ok(self.model.load(base_dir)?)
    }
}
