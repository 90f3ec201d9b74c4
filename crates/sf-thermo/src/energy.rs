//! Energy flows without chemical composition (electricity, losses, chemical energy).

use sf_core::ensure_finite;

use crate::error::ThermoResult;

/// A named amount of energy [J].
///
/// Sign follows the flow direction: a device input of positive energy adds
/// heat or work to the device.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyFlow {
    name: String,
    energy: f64,
}

impl EnergyFlow {
    pub fn new(name: impl Into<String>, energy: f64) -> Self {
        Self {
            name: name.into(),
            energy,
        }
    }

    /// An energy flow starting at zero.
    pub fn zero(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn set_energy(&mut self, joules: f64) -> ThermoResult<()> {
        self.energy = ensure_finite(joules, "energy flow")?;
        Ok(())
    }

    pub fn add_energy(&mut self, joules: f64) -> ThermoResult<()> {
        self.set_energy(self.energy + joules)
    }

    pub fn set(&mut self, other: &EnergyFlow) {
        self.clone_from(other);
    }
}

impl std::fmt::Display for EnergyFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EnergyFlow({}, {:.2} kWh)", self.name, sf_core::joules_to_kwh(self.energy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_accumulates() {
        let mut e = EnergyFlow::zero("electricity");
        e.add_energy(1000.0).unwrap();
        e.add_energy(-250.0).unwrap();
        assert_eq!(e.energy(), 750.0);
        assert!(e.set_energy(f64::NAN).is_err());
        assert_eq!(e.energy(), 750.0);
    }

    #[test]
    fn display_in_kwh() {
        let e = EnergyFlow::new("losses", 3.6e6);
        assert_eq!(e.to_string(), "EnergyFlow(losses, 1.00 kWh)");
    }
}
