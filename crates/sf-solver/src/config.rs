//! Solver configuration and its YAML/JSON file format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::balance::BalanceOptions;
use crate::error::{SolverError, SolverResult};
use crate::signal::AdjustmentTable;

/// Settings for the outer retry loop and the local exit-temperature solver.
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```yaml
/// max_attempts: 200
/// adjustments:
///   increase_injected_o2:
///     parameter: o2 injection kg
///     factor: 1.1
///     seed: 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of physics passes before giving up
    pub max_attempts: usize,
    /// Absolute tolerance for the post-solve mass and energy checks
    pub balance_tolerance: f64,
    pub adjustments: AdjustmentTable,
    pub balance: BalanceOptions,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            balance_tolerance: 1e-4,
            adjustments: AdjustmentTable::default(),
            balance: BalanceOptions::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_attempts == 0 {
            return Err(config_error("max_attempts must be at least 1"));
        }
        positive(self.balance_tolerance, "balance_tolerance")?;
        positive(self.balance.tolerance, "balance.tolerance")?;
        if self.balance.max_iterations == 0 {
            return Err(config_error("balance.max_iterations must be at least 1"));
        }
        self.adjustments.validate()
    }

    pub fn from_yaml_str(text: &str) -> SolverResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> SolverResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn to_yaml_string(&self) -> SolverResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn config_error(what: impl Into<String>) -> SolverError {
    SolverError::Config { what: what.into() }
}

fn positive(value: f64, name: &str) -> SolverResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(config_error(format!("{name} must be positive (got {value})")))
    }
}
