//! Thermodynamic data and flow errors.

use sf_core::SfError;
use thiserror::Error;

/// Result type for thermodynamic operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while building correlations or evaluating flows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// A segment with an empty or inverted temperature range.
    #[error("Invalid correlation segment: {what}")]
    InvalidSegment { what: &'static str },

    /// Adjacent segments leave a gap or overlap.
    #[error(
        "Non-continuous temperature ranges in thermo data (gap or overlap between {upper_of_previous} K and {lower_of_next} K)"
    )]
    NonContiguous {
        upper_of_previous: f64,
        lower_of_next: f64,
    },

    /// A latent heat event lies outside the covered temperature range.
    #[error("Latent heat at {kelvin} K is outside the covered range {min} K - {max} K")]
    LatentHeatOutOfRange { kelvin: f64, min: f64, max: f64 },

    /// A temperature lies outside the correlation coverage.
    #[error("Temperature {kelvin} K is outside the covered range {min} K - {max} K")]
    OutOfRange { kelvin: f64, min: f64, max: f64 },

    #[error("Temperature of {name} is not set")]
    TemperatureNotSet { name: String },

    #[error("Species temperatures in mixture {name} do not match")]
    MismatchedTemperatures { name: String },

    #[error("Species {species} not found in {mixture}")]
    SpeciesNotFound { species: String, mixture: String },

    #[error("Species {species} appears more than once in {mixture}")]
    DuplicateSpecies { species: String, mixture: String },

    #[error("Enthalpy of formation is not set for {name}")]
    FormationEnthalpyNotSet { name: String },

    /// Operation on a flow of the wrong kind (e.g. temperature of an energy flow).
    #[error("Flow kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Merging requires every input to be at or above the baseline temperature.
    #[error("Cannot merge {species} at {kelvin} K: below the {baseline} K baseline")]
    BelowMergeBaseline {
        species: String,
        kelvin: f64,
        baseline: f64,
    },

    #[error("Operation not supported: {what}")]
    NotSupported { what: &'static str },

    /// Bounded iteration ran out of attempts.
    #[error("{what} did not converge after {iterations} iterations")]
    ConvergenceFailed { what: &'static str, iterations: usize },

    #[error(transparent)]
    Core(#[from] SfError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::OutOfRange {
            kelvin: 50.0,
            min: 100.0,
            max: 500.0,
        };
        assert!(err.to_string().contains("50"));

        let err = ThermoError::TemperatureNotSet { name: "H2".into() };
        assert!(err.to_string().contains("H2"));
    }

    #[test]
    fn core_error_converts() {
        let err: ThermoError = SfError::Negative {
            what: "moles",
            value: -1.0,
        }
        .into();
        assert!(matches!(err, ThermoError::Core(SfError::Negative { .. })));
    }
}
