use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// How `V` is seeded before the first sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitKind {
    /// Every state starts at 0.
    Zero,
    /// Seeded uniform draw in `[0, 1)` per state.
    #[default]
    Uniform,
}

/// Which value vector a sweep reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepMode {
    /// Classical value iteration: backups read a snapshot of the previous sweep.
    #[default]
    Synchronous,
    /// Asynchronous value iteration: backups read values already updated in this sweep.
    InPlace,
}

/// Value-iteration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SolverConfig {
    pub discount_factor: f64,
    pub epsilon_stop: f64,
    pub max_iterations: usize,
    pub init: InitKind,
    pub seed: u64,
    pub sweep: SweepMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            discount_factor: 0.95,
            epsilon_stop: 1e-4,
            max_iterations: 1_000_000,
            init: InitKind::Uniform,
            seed: 0,
            sweep: SweepMode::Synchronous,
        }
    }
}

impl SolverConfig {
    /// Default configuration with a different discount factor.
    pub fn with_discount(discount_factor: f64) -> Self {
        SolverConfig {
            discount_factor,
            ..SolverConfig::default()
        }
    }

    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolverConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check the ranges the solver relies on. `gamma = 1` is rejected: no contraction.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if !self.discount_factor.is_finite() || !(0.0..1.0).contains(&self.discount_factor) {
            return Err(SolverConfigError::Invalid(format!(
                "discount-factor must be in [0, 1), got {}",
                self.discount_factor
            )));
        }
        if !self.epsilon_stop.is_finite() || self.epsilon_stop <= 0.0 {
            return Err(SolverConfigError::Invalid(format!(
                "epsilon-stop must be finite and > 0, got {}",
                self.epsilon_stop
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverConfigError::Invalid(
                "max-iterations must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for SolverConfigError {}
