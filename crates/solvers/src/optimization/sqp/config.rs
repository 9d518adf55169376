use thiserror::Error;

/// Configuration for the SQP solver.
///
/// Tolerances are expressed in the solver's internal units: variables mapped
/// onto the unit box and objective/constraints scaled by their initial
/// gradient magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    max_backtracks: usize,
    x_tol: f64,
    f_tol: f64,
    feasibility_tol: f64,
    fd_step: f64,
    elastic_weight: f64,
}

/// Errors that can occur when validating an SQP solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_tol must be finite and non-negative")]
    XTol,

    #[error("f_tol must be finite and non-negative")]
    FTol,

    #[error("feasibility_tol must be finite and non-negative")]
    FeasibilityTol,

    #[error("fd_step must be finite and in (0, 0.5)")]
    FdStep,

    #[error("elastic_weight must be finite and positive")]
    ElasticWeight,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(100, 30, 1e-8, 1e-10, 1e-8, 1e-6, 1e3).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// - `max_iters`: cap on accepted steps
    /// - `max_backtracks`: cap on step halvings within one line search
    /// - `x_tol`: step length (unit-box infinity norm) treated as converged
    /// - `f_tol`: predicted merit decrease, relative to `1 + |f|`, treated as
    ///   converged once the point is feasible
    /// - `feasibility_tol`: scaled constraint violation treated as satisfied
    /// - `fd_step`: finite-difference step in the unit box
    /// - `elastic_weight`: cost of slack in the QP subproblem
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite, the
    /// finite-difference step is outside `(0, 0.5)`, or the elastic weight is
    /// not positive.
    pub fn new(
        max_iters: usize,
        max_backtracks: usize,
        x_tol: f64,
        f_tol: f64,
        feasibility_tol: f64,
        fd_step: f64,
        elastic_weight: f64,
    ) -> Result<Self, ConfigError> {
        if !x_tol.is_finite() || x_tol < 0.0 {
            return Err(ConfigError::XTol);
        }
        if !f_tol.is_finite() || f_tol < 0.0 {
            return Err(ConfigError::FTol);
        }
        if !feasibility_tol.is_finite() || feasibility_tol < 0.0 {
            return Err(ConfigError::FeasibilityTol);
        }
        if !fd_step.is_finite() || fd_step <= 0.0 || fd_step >= 0.5 {
            return Err(ConfigError::FdStep);
        }
        if !elastic_weight.is_finite() || elastic_weight <= 0.0 {
            return Err(ConfigError::ElasticWeight);
        }

        Ok(Self {
            max_iters,
            max_backtracks,
            x_tol,
            f_tol,
            feasibility_tol,
            fd_step,
            elastic_weight,
        })
    }

    /// Returns the maximum number of accepted steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the maximum number of step halvings per line search.
    #[must_use]
    pub fn max_backtracks(&self) -> usize {
        self.max_backtracks
    }

    /// Returns the step-length tolerance for convergence.
    #[must_use]
    pub fn x_tol(&self) -> f64 {
        self.x_tol
    }

    /// Returns the relative predicted-decrease tolerance for convergence.
    #[must_use]
    pub fn f_tol(&self) -> f64 {
        self.f_tol
    }

    /// Returns the scaled constraint violation treated as feasible.
    #[must_use]
    pub fn feasibility_tol(&self) -> f64 {
        self.feasibility_tol
    }

    /// Returns the finite-difference step.
    #[must_use]
    pub fn fd_step(&self) -> f64 {
        self.fd_step
    }

    /// Returns the elastic slack weight.
    #[must_use]
    pub fn elastic_weight(&self) -> f64 {
        self.elastic_weight
    }
}
