//! Recoverable infeasibility signals and the parameter adjustment each one owns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sf_graph::Parameters;

use crate::error::{SolverError, SolverResult};

/// Closed set of conditions a physics pass may raise to request a parameter
/// change and a full restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    IncreaseExcessHydrogenPlasma,
    IncreaseExcessHydrogenFluidizedBeds,
    IncreaseCInHotMetal,
    DecreaseSiInHotMetal,
    IncreaseInjectedO2,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::IncreaseExcessHydrogenPlasma,
        Signal::IncreaseExcessHydrogenFluidizedBeds,
        Signal::IncreaseCInHotMetal,
        Signal::DecreaseSiInHotMetal,
        Signal::IncreaseInjectedO2,
    ];
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Signal::IncreaseExcessHydrogenPlasma => "increase plasma excess h2 ratio",
            Signal::IncreaseExcessHydrogenFluidizedBeds => "increase fluidized bed excess h2 ratio",
            Signal::IncreaseCInHotMetal => "increase hot metal C",
            Signal::DecreaseSiInHotMetal => "decrease hot metal Si",
            Signal::IncreaseInjectedO2 => "increase injected o2",
        };
        f.write_str(text)
    }
}

/// Multiplicative step applied to one named parameter.
///
/// `factor > 1` grows the parameter, `factor < 1` shrinks it. When `seed` is
/// set, an absent or zero parameter is set to the seed instead of scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub parameter: String,
    pub factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<f64>,
}

impl Adjustment {
    pub fn new(parameter: impl Into<String>, factor: f64) -> Self {
        Self {
            parameter: parameter.into(),
            factor,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn grows(&self) -> bool {
        self.factor > 1.0
    }

    /// Apply the step to `params` and return the new value.
    pub fn apply(&self, params: &mut Parameters) -> SolverResult<f64> {
        let current = params.get(&self.parameter);
        let value = match (current, self.seed) {
            (None, Some(seed)) => seed,
            (Some(v), Some(seed)) if v == 0.0 => seed,
            (Some(v), _) => v * self.factor,
            (None, None) => params.require(&self.parameter)?,
        };
        params.set(self.parameter.clone(), value);
        Ok(value)
    }

    fn validate(&self) -> SolverResult<()> {
        if !(self.factor.is_finite() && self.factor > 0.0) || self.factor == 1.0 {
            return Err(SolverError::Config {
                what: format!(
                    "adjustment factor for '{}' must be positive and not 1 (got {})",
                    self.parameter, self.factor
                ),
            });
        }
        Ok(())
    }
}

/// Signal -> adjustment mapping used by the outer loop.
///
/// Deserialised entries override the defaults one signal at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Signal, Adjustment>", into = "BTreeMap<Signal, Adjustment>")]
pub struct AdjustmentTable {
    entries: BTreeMap<Signal, Adjustment>,
}

impl Default for AdjustmentTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (
                Signal::IncreaseExcessHydrogenPlasma,
                Adjustment::new("plasma h2 excess ratio", 1.05),
            ),
            (
                Signal::IncreaseExcessHydrogenFluidizedBeds,
                Adjustment::new("fluidized beds h2 excess ratio", 1.05),
            ),
            (
                Signal::IncreaseCInHotMetal,
                Adjustment::new("bof hot metal C perc", 1.05),
            ),
            (
                Signal::DecreaseSiInHotMetal,
                Adjustment::new("bof hot metal Si perc", 0.95),
            ),
            (
                Signal::IncreaseInjectedO2,
                Adjustment::new("o2 injection kg", 1.05).with_seed(0.1),
            ),
        ]);
        Self { entries }
    }
}

impl From<BTreeMap<Signal, Adjustment>> for AdjustmentTable {
    fn from(overrides: BTreeMap<Signal, Adjustment>) -> Self {
        let mut table = Self::default();
        table.entries.extend(overrides);
        table
    }
}

impl From<AdjustmentTable> for BTreeMap<Signal, Adjustment> {
    fn from(table: AdjustmentTable) -> Self {
        table.entries
    }
}

impl AdjustmentTable {
    pub fn get(&self, signal: Signal) -> SolverResult<&Adjustment> {
        self.entries
            .get(&signal)
            .ok_or_else(|| SolverError::Config {
                what: format!("no adjustment configured for signal '{signal}'"),
            })
    }

    pub fn set(&mut self, signal: Signal, adjustment: Adjustment) {
        self.entries.insert(signal, adjustment);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Signal, &Adjustment)> {
        self.entries.iter().map(|(s, a)| (*s, a))
    }

    pub fn validate(&self) -> SolverResult<()> {
        self.entries.values().try_for_each(Adjustment::validate)
    }
}
