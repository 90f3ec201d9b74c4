//! Error types for solver operations.

use sf_core::SfError;
use sf_graph::GraphError;
use sf_thermo::ThermoError;
use thiserror::Error;

use crate::signal::Signal;

/// Hard failures of the local and outer solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Could not solve {system}: maximum of {attempts} attempts reached")]
    MaxAttemptsExceeded { system: String, attempts: usize },

    /// The final pass raised a signal after the trial pass with the same
    /// parameters succeeded; the physics procedure is not deterministic.
    #[error("Final pass of {system} raised {signal} after a successful trial")]
    FinalPassInfeasible { system: String, signal: Signal },

    /// A converged system violates a device balance.
    #[error("Balance check failed for {system}: {source}")]
    BalanceViolation {
        system: String,
        #[source]
        source: GraphError,
    },

    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Thermo error: {0}")]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Core(#[from] SfError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<serde_yaml::Error> for SolverError {
    fn from(e: serde_yaml::Error) -> Self {
        SolverError::Config {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_violation_keeps_source() {
        let err = SolverError::BalanceViolation {
            system: "plant".into(),
            source: GraphError::Unbalanced {
                device: "eaf".into(),
                quantity: "Energy",
                value: 3.0,
                tolerance: 1e-4,
            },
        };
        let text = err.to_string();
        assert!(text.contains("plant"));
        assert!(text.contains("eaf"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
