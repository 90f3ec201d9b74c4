//! Named groups of species (gas mixtures, slag, DRI, ...).

use crate::error::{ThermoError, ThermoResult};
use crate::flow::Flow;
use crate::species::{HeatCapacityBasis, Species, probe_molar_cp};
use sf_core::{BASELINE_KELVIN, Tolerances, is_negligible, nearly_equal};

/// Newton refinements allowed when solving a merged temperature.
const MAX_MERGE_ITERATIONS: usize = 10;
/// Relative enthalpy residual accepted by the merge.
const MERGE_REL_TOL: f64 = 1e-12;

/// An ordered collection of uniquely named species.
#[derive(Debug, Clone)]
pub struct Mixture {
    name: String,
    species: Vec<Species>,
}

impl Mixture {
    pub fn new(name: impl Into<String>, species: Vec<Species>) -> ThermoResult<Self> {
        let name = name.into();
        for (i, s) in species.iter().enumerate() {
            if species[..i].iter().any(|other| other.name() == s.name()) {
                return Err(ThermoError::DuplicateSpecies {
                    species: s.name().to_string(),
                    mixture: name,
                });
            }
        }
        Ok(Self { name, species })
    }

    /// A mixture with no species yet, typically the target of merges.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn num_species(&self) -> usize {
        self.species.len()
    }

    pub fn species_named(&self, species: &str) -> ThermoResult<&Species> {
        self.species
            .iter()
            .find(|s| s.name() == species)
            .ok_or_else(|| self.not_found(species))
    }

    pub fn species_named_mut(&mut self, species: &str) -> ThermoResult<&mut Species> {
        let missing = self.not_found(species);
        self.species
            .iter_mut()
            .find(|s| s.name() == species)
            .ok_or(missing)
    }

    /// Remove a species by name, returning it if it was present.
    pub fn remove_species(&mut self, species: &str) -> Option<Species> {
        let index = self.species.iter().position(|s| s.name() == species)?;
        Some(self.species.remove(index))
    }

    /// Mass [kg].
    pub fn mass(&self) -> f64 {
        self.species.iter().map(Species::mass).sum()
    }

    pub fn moles(&self) -> f64 {
        self.species.iter().map(Species::moles).sum()
    }

    /// Common temperature of every species; an error if they disagree.
    pub fn temperature(&self) -> ThermoResult<f64> {
        let Some(first) = self.species.first() else {
            return Err(ThermoError::TemperatureNotSet {
                name: self.name.clone(),
            });
        };
        let kelvin = first.temperature_opt();
        if self.species.iter().any(|s| s.temperature_opt() != kelvin) {
            return Err(ThermoError::MismatchedTemperatures {
                name: self.name.clone(),
            });
        }
        kelvin.ok_or_else(|| ThermoError::TemperatureNotSet {
            name: self.name.clone(),
        })
    }

    pub fn set_temperature(&mut self, kelvin: f64) -> ThermoResult<()> {
        for s in &mut self.species {
            s.set_temperature(kelvin)?;
        }
        Ok(())
    }

    /// Enthalpy [J] needed to bring every species to `t_final`.
    pub fn heat_energy(&self, t_final: f64) -> ThermoResult<f64> {
        self.species.iter().try_fold(0.0, |acc, s| {
            if is_negligible(s.moles()) {
                Ok(acc)
            } else {
                Ok(acc + s.heat_energy(t_final)?)
            }
        })
    }

    /// Alias of [`Mixture::heat_energy`].
    pub fn delta_h(&self, t_final: f64) -> ThermoResult<f64> {
        self.heat_energy(t_final)
    }

    /// Amount-weighted heat capacity at the common temperature.
    pub fn cp(&self, basis: HeatCapacityBasis) -> ThermoResult<f64> {
        let kelvin = self.temperature()?;
        let total = self.total_heat_capacity(kelvin)?;
        let denominator = match basis {
            HeatCapacityBasis::PerMole => self.moles(),
            HeatCapacityBasis::PerKilogram => self.mass(),
        };
        if is_negligible(denominator) {
            return Err(ThermoError::NotSupported {
                what: "heat capacity of an empty mixture",
            });
        }
        Ok(total / denominator)
    }

    /// Mass fraction of each species in percent.
    pub fn weight_percentages(&self) -> Vec<(String, f64)> {
        let total = self.mass();
        self.species
            .iter()
            .map(|s| {
                let pct = if is_negligible(total) {
                    0.0
                } else {
                    s.mass() / total * 100.0
                };
                (s.name().to_string(), pct)
            })
            .collect()
    }

    /// Same mass, temperature and species count (loose equivalence).
    pub fn is_same_as(&self, other: &Mixture) -> bool {
        let tol = Tolerances::default();
        let same_temp = match (self.temperature(), other.temperature()) {
            (Ok(a), Ok(b)) => nearly_equal(a, b, tol),
            _ => false,
        };
        same_temp
            && nearly_equal(self.mass(), other.mass(), tol)
            && self.num_species() == other.num_species()
    }

    /// Overwrite this mixture wholesale with `other`.
    pub fn set(&mut self, other: &Mixture) {
        self.clone_from(other);
    }

    /// Merge a species or mixture flow into this mixture.
    pub fn merge(&mut self, other: &Flow) -> ThermoResult<()> {
        match other {
            Flow::Species(s) => self.merge_species(s),
            Flow::Mixture(m) => self.merge_mixture(m),
            Flow::Energy(_) => Err(ThermoError::KindMismatch {
                expected: "species or mixture",
                found: other.kind(),
            }),
        }
    }

    pub fn merge_species(&mut self, other: &Species) -> ThermoResult<()> {
        self.merge_all(std::slice::from_ref(other))
    }

    pub fn merge_mixture(&mut self, other: &Mixture) -> ThermoResult<()> {
        self.merge_all(&other.species)
    }

    /// Add `incoming` to this mixture, summing moles of same-named species, and
    /// set the temperature that conserves enthalpy measured from the baseline.
    fn merge_all(&mut self, incoming: &[Species]) -> ThermoResult<()> {
        let incoming_mass: f64 = incoming.iter().map(Species::mass).sum();
        if is_negligible(incoming_mass) {
            return Ok(());
        }

        let mut energy_in = 0.0;
        let mut heat_capacity = 0.0;
        for s in self.species.iter().chain(incoming) {
            if is_negligible(s.moles()) {
                continue;
            }
            let kelvin = s.temperature()?;
            if kelvin < BASELINE_KELVIN {
                return Err(ThermoError::BelowMergeBaseline {
                    species: s.name().to_string(),
                    kelvin,
                    baseline: BASELINE_KELVIN,
                });
            }
            energy_in -= s.heat_energy(BASELINE_KELVIN)?;
            heat_capacity += s.moles() * s.cp(HeatCapacityBasis::PerMole)?;
        }

        for s in incoming {
            match self.species.iter_mut().find(|e| e.name() == s.name()) {
                Some(existing) => {
                    let moles = existing.moles() + s.moles();
                    existing.set_moles(moles)?;
                }
                None => self.species.push(s.clone()),
            }
        }

        let mut kelvin = BASELINE_KELVIN + energy_in / heat_capacity;
        self.set_temperature(kelvin)?;
        if is_negligible(energy_in) {
            return Ok(());
        }

        // The linear estimate assumes constant heat capacity; refine with Newton steps.
        for _ in 0..=MAX_MERGE_ITERATIONS {
            let energy_out = -self.heat_energy(BASELINE_KELVIN)?;
            let residual = energy_in - energy_out;
            if (residual / energy_in).abs() < MERGE_REL_TOL {
                return Ok(());
            }
            kelvin += residual / self.total_heat_capacity(kelvin)?;
            self.set_temperature(kelvin)?;
        }

        Err(ThermoError::ConvergenceFailed {
            what: "mixture merge temperature",
            iterations: MAX_MERGE_ITERATIONS,
        })
    }

    /// Total heat capacity [J/K] of the current amounts at `kelvin`.
    fn total_heat_capacity(&self, kelvin: f64) -> ThermoResult<f64> {
        self.species.iter().try_fold(0.0, |acc, s| {
            if is_negligible(s.moles()) {
                Ok(acc)
            } else {
                Ok(acc + s.moles() * probe_molar_cp(s.thermo(), kelvin)?)
            }
        })
    }

    fn not_found(&self, species: &str) -> ThermoError {
        ThermoError::SpeciesNotFound {
            species: species.to_string(),
            mixture: self.name.clone(),
        }
    }
}

impl std::fmt::Display for Mixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mixture({}", self.name)?;
        for s in &self.species {
            write!(f, ", {s}")?;
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.temperature_opt() {
            Some(kelvin) => write!(f, "Species({}, {:.2} kg, {kelvin} K)", self.name(), self.mass()),
            None => write!(f, "Species({}, {:.2} kg, unset)", self.name(), self.mass()),
        }
    }
}
