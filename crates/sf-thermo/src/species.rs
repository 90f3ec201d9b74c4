//! A quantity of one chemical species.

use std::sync::Arc;

use crate::error::{ThermoError, ThermoResult};
use crate::thermo_data::ThermoData;
use sf_core::{Tolerances, ensure_non_negative, nearly_equal};

/// Denominator for heat capacities derived from a 1 K enthalpy probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatCapacityBasis {
    /// J/(mol·K)
    PerMole,
    /// J/(kg·K)
    PerKilogram,
}

/// An element, compound or ion with an amount and (once assigned) a temperature.
///
/// Thermo data is shared between copies; cloning a species is cheap.
#[derive(Debug, Clone)]
pub struct Species {
    name: String,
    /// kg/mol
    molar_mass: f64,
    moles: f64,
    kelvin: Option<f64>,
    thermo: Arc<ThermoData>,
    /// J/mol at 298.15 K
    delta_h_formation: Option<f64>,
}

impl Species {
    pub fn new(
        name: impl Into<String>,
        molar_mass: f64,
        thermo: ThermoData,
        delta_h_formation: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            molar_mass,
            moles: 0.0,
            kelvin: None,
            thermo: Arc::new(thermo),
            delta_h_formation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn moles(&self) -> f64 {
        self.moles
    }

    pub fn set_moles(&mut self, moles: f64) -> ThermoResult<()> {
        self.moles = ensure_non_negative(moles, "species moles")?;
        Ok(())
    }

    /// Builder-style amount setter.
    pub fn with_moles(mut self, moles: f64) -> ThermoResult<Self> {
        self.set_moles(moles)?;
        Ok(self)
    }

    /// Mass [kg].
    pub fn mass(&self) -> f64 {
        self.moles * self.molar_mass
    }

    pub fn set_mass(&mut self, kg: f64) -> ThermoResult<()> {
        let kg = ensure_non_negative(kg, "species mass")?;
        self.moles = kg / self.molar_mass;
        Ok(())
    }

    /// kg/mol
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    pub fn thermo(&self) -> &ThermoData {
        &self.thermo
    }

    pub fn temperature_opt(&self) -> Option<f64> {
        self.kelvin
    }

    pub fn temperature(&self) -> ThermoResult<f64> {
        self.kelvin.ok_or_else(|| ThermoError::TemperatureNotSet {
            name: self.name.clone(),
        })
    }

    pub fn set_temperature(&mut self, kelvin: f64) -> ThermoResult<()> {
        self.kelvin = Some(ensure_non_negative(kelvin, "species temperature")?);
        Ok(())
    }

    /// Builder-style temperature setter.
    pub fn at(mut self, kelvin: f64) -> ThermoResult<Self> {
        self.set_temperature(kelvin)?;
        Ok(self)
    }

    /// Enthalpy [J] needed to bring this species from its current temperature to
    /// `t_final`. Does not change the species.
    pub fn heat_energy(&self, t_final: f64) -> ThermoResult<f64> {
        self.thermo.delta_h(self.moles, self.temperature()?, t_final)
    }

    /// Alias of [`Species::heat_energy`].
    pub fn delta_h(&self, t_final: f64) -> ThermoResult<f64> {
        self.heat_energy(t_final)
    }

    /// Heat capacity at the current temperature from a 1 K enthalpy probe.
    pub fn cp(&self, basis: HeatCapacityBasis) -> ThermoResult<f64> {
        let kelvin = self.temperature()?;
        let molar = probe_molar_cp(&self.thermo, kelvin)?;
        Ok(match basis {
            HeatCapacityBasis::PerMole => molar,
            HeatCapacityBasis::PerKilogram => molar / self.molar_mass,
        })
    }

    pub fn delta_h_formation(&self) -> ThermoResult<f64> {
        self.delta_h_formation
            .ok_or_else(|| ThermoError::FormationEnthalpyNotSet {
                name: self.name.clone(),
            })
    }

    /// Same amount, molar mass and temperature (loose equivalence).
    pub fn is_same_as(&self, other: &Species) -> bool {
        let tol = Tolerances::default();
        let same_temp = match (self.kelvin, other.kelvin) {
            (Some(a), Some(b)) => nearly_equal(a, b, tol),
            (None, None) => true,
            _ => false,
        };
        same_temp
            && nearly_equal(self.moles, other.moles, tol)
            && nearly_equal(self.molar_mass, other.molar_mass, tol)
    }

    /// Overwrite this species wholesale with `other`.
    pub fn set(&mut self, other: &Species) {
        self.clone_from(other);
    }
}

/// Molar heat capacity from the enthalpy of one mole over a 1 K step, probing
/// downwards at the top of the covered range.
pub(crate) fn probe_molar_cp(thermo: &ThermoData, kelvin: f64) -> ThermoResult<f64> {
    if thermo.covers(kelvin + 1.0) {
        thermo.delta_h(1.0, kelvin, kelvin + 1.0)
    } else {
        thermo.delta_h(1.0, kelvin - 1.0, kelvin)
    }
}
