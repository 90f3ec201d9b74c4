//! The three kinds of flow a device can exchange.

use crate::energy::EnergyFlow;
use crate::error::{ThermoError, ThermoResult};
use crate::mixture::Mixture;
use crate::species::{HeatCapacityBasis, Species};

/// Material or energy carried along one edge of the flow graph.
#[derive(Debug, Clone)]
pub enum Flow {
    Species(Species),
    Mixture(Mixture),
    Energy(EnergyFlow),
}

impl Flow {
    pub fn kind(&self) -> &'static str {
        match self {
            Flow::Species(_) => "species",
            Flow::Mixture(_) => "mixture",
            Flow::Energy(_) => "energy",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Flow::Species(s) => s.name(),
            Flow::Mixture(m) => m.name(),
            Flow::Energy(e) => e.name(),
        }
    }

    /// Chemical flows carry mass and temperature; energy flows carry neither.
    pub fn is_chemical(&self) -> bool {
        !matches!(self, Flow::Energy(_))
    }

    /// Mass [kg]; zero for energy flows.
    pub fn mass(&self) -> f64 {
        match self {
            Flow::Species(s) => s.mass(),
            Flow::Mixture(m) => m.mass(),
            Flow::Energy(_) => 0.0,
        }
    }

    pub fn set_mass(&mut self, kg: f64) -> ThermoResult<()> {
        match self {
            Flow::Species(s) => s.set_mass(kg),
            other => Err(other.mismatch("species")),
        }
    }

    pub fn moles(&self) -> ThermoResult<f64> {
        match self {
            Flow::Species(s) => Ok(s.moles()),
            Flow::Mixture(m) => Ok(m.moles()),
            Flow::Energy(_) => Err(self.mismatch("species or mixture")),
        }
    }

    pub fn temperature(&self) -> ThermoResult<f64> {
        match self {
            Flow::Species(s) => s.temperature(),
            Flow::Mixture(m) => m.temperature(),
            Flow::Energy(_) => Err(self.mismatch("species or mixture")),
        }
    }

    pub fn set_temperature(&mut self, kelvin: f64) -> ThermoResult<()> {
        match self {
            Flow::Species(s) => s.set_temperature(kelvin),
            Flow::Mixture(m) => m.set_temperature(kelvin),
            Flow::Energy(_) => Err(self.mismatch("species or mixture")),
        }
    }

    /// Energy [J]; only defined for energy flows.
    pub fn energy(&self) -> ThermoResult<f64> {
        match self {
            Flow::Energy(e) => Ok(e.energy()),
            other => Err(other.mismatch("energy")),
        }
    }

    /// Enthalpy [J] to bring the flow from its temperature to `t_final`.
    pub fn heat_energy(&self, t_final: f64) -> ThermoResult<f64> {
        match self {
            Flow::Species(s) => s.heat_energy(t_final),
            Flow::Mixture(m) => m.heat_energy(t_final),
            Flow::Energy(_) => Err(self.mismatch("species or mixture")),
        }
    }

    /// Sensible plus latent enthalpy [J] the flow holds above `reference`.
    pub fn enthalpy_above(&self, reference: f64) -> ThermoResult<f64> {
        Ok(-self.heat_energy(reference)?)
    }

    pub fn cp(&self, basis: HeatCapacityBasis) -> ThermoResult<f64> {
        match self {
            Flow::Species(s) => s.cp(basis),
            Flow::Mixture(m) => m.cp(basis),
            Flow::Energy(_) => Err(self.mismatch("species or mixture")),
        }
    }

    /// Replace this flow's content with `other`; both must be the same kind.
    pub fn set_from(&mut self, other: &Flow) -> ThermoResult<()> {
        match (self, other) {
            (Flow::Species(a), Flow::Species(b)) => a.set(b),
            (Flow::Mixture(a), Flow::Mixture(b)) => a.set(b),
            (Flow::Energy(a), Flow::Energy(b)) => a.set(b),
            (this, other) => {
                return Err(ThermoError::KindMismatch {
                    expected: this.kind(),
                    found: other.kind(),
                });
            }
        }
        Ok(())
    }

    /// Merge `other` into this flow.
    ///
    /// A species absorbs `other` through a temporary mixture and must remain a
    /// single species. Energy flows add.
    pub fn merge(&mut self, other: &Flow) -> ThermoResult<()> {
        match self {
            Flow::Mixture(m) => m.merge(other),
            Flow::Species(s) => {
                let mut staged = Mixture::new(s.name().to_string(), vec![s.clone()])?;
                staged.merge(other)?;
                match staged.species() {
                    [merged] => {
                        s.set(merged);
                        Ok(())
                    }
                    _ => Err(ThermoError::NotSupported {
                        what: "merging a different species into a species flow",
                    }),
                }
            }
            Flow::Energy(e) => match other {
                Flow::Energy(o) => e.add_energy(o.energy()),
                _ => Err(ThermoError::KindMismatch {
                    expected: "energy",
                    found: other.kind(),
                }),
            },
        }
    }

    pub fn as_species(&self) -> ThermoResult<&Species> {
        match self {
            Flow::Species(s) => Ok(s),
            other => Err(other.mismatch("species")),
        }
    }

    pub fn as_species_mut(&mut self) -> ThermoResult<&mut Species> {
        match self {
            Flow::Species(s) => Ok(s),
            other => Err(other.mismatch("species")),
        }
    }

    pub fn as_mixture(&self) -> ThermoResult<&Mixture> {
        match self {
            Flow::Mixture(m) => Ok(m),
            other => Err(other.mismatch("mixture")),
        }
    }

    pub fn as_mixture_mut(&mut self) -> ThermoResult<&mut Mixture> {
        match self {
            Flow::Mixture(m) => Ok(m),
            other => Err(other.mismatch("mixture")),
        }
    }

    pub fn as_energy(&self) -> ThermoResult<&EnergyFlow> {
        match self {
            Flow::Energy(e) => Ok(e),
            other => Err(other.mismatch("energy")),
        }
    }

    pub fn as_energy_mut(&mut self) -> ThermoResult<&mut EnergyFlow> {
        match self {
            Flow::Energy(e) => Ok(e),
            other => Err(other.mismatch("energy")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ThermoError {
        ThermoError::KindMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl From<Species> for Flow {
    fn from(s: Species) -> Self {
        Flow::Species(s)
    }
}

impl From<Mixture> for Flow {
    fn from(m: Mixture) -> Self {
        Flow::Mixture(m)
    }
}

impl From<EnergyFlow> for Flow {
    fn from(e: EnergyFlow) -> Self {
        Flow::Energy(e)
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flow::Species(s) => std::fmt::Display::fmt(s, f),
            Flow::Mixture(m) => std::fmt::Display::fmt(m, f),
            Flow::Energy(e) => std::fmt::Display::fmt(e, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::Segment;
    use crate::thermo_data::ThermoData;

    fn species(name: &str, moles: f64, kelvin: f64) -> Species {
        let thermo =
            ThermoData::from_segments(vec![Segment::constant(273.15, 3000.0, 20.0).unwrap()])
                .unwrap();
        Species::new(name, 0.01, thermo, None)
            .with_moles(moles)
            .unwrap()
            .at(kelvin)
            .unwrap()
    }

    #[test]
    fn energy_flow_has_no_temperature() {
        let flow = Flow::from(EnergyFlow::new("electricity", 5.0));
        assert_eq!(flow.mass(), 0.0);
        assert!(matches!(
            flow.temperature(),
            Err(ThermoError::KindMismatch { .. })
        ));
        assert_eq!(flow.energy().unwrap(), 5.0);
    }

    #[test]
    fn set_from_requires_matching_kind() {
        let mut a = Flow::from(species("A", 1.0, 400.0));
        let b = Flow::from(species("A", 2.0, 500.0));
        a.set_from(&b).unwrap();
        assert_eq!(a.temperature().unwrap(), 500.0);

        let e = Flow::from(EnergyFlow::zero("losses"));
        assert!(matches!(
            a.set_from(&e),
            Err(ThermoError::KindMismatch {
                expected: "species",
                found: "energy"
            })
        ));
    }

    #[test]
    fn enthalpy_above_reference() {
        let flow = Flow::from(species("A", 2.0, 400.0));
        let h = flow.enthalpy_above(300.0).unwrap();
        assert!((h - 2.0 * 20.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn species_merge_stays_single_species() {
        let mut flow = Flow::from(species("A", 1.0, 600.0));
        flow.merge(&Flow::from(species("A", 1.0, 400.0))).unwrap();
        let merged = flow.as_species().unwrap();
        assert!((merged.moles() - 2.0).abs() < 1e-12);
        assert!((merged.temperature().unwrap() - 500.0).abs() < 1e-8);

        let err = flow.merge(&Flow::from(species("B", 1.0, 400.0)));
        assert!(matches!(err, Err(ThermoError::NotSupported { .. })));
        // A failed merge leaves the species untouched.
        assert!((flow.as_species().unwrap().moles() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn energy_flows_merge_by_addition() {
        let mut flow = Flow::from(EnergyFlow::new("a", 10.0));
        flow.merge(&Flow::from(EnergyFlow::new("b", 5.0))).unwrap();
        assert_eq!(flow.energy().unwrap(), 15.0);
        assert!(flow.merge(&Flow::from(species("A", 1.0, 400.0))).is_err());
    }
}
