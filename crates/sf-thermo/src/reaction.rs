//! Reaction enthalpy from standard formation enthalpies.

use sf_core::REFERENCE_KELVIN;

use crate::error::ThermoResult;
use crate::species::Species;

/// Enthalpy change [J] of turning `reactants` into `products` at `kelvin`.
///
/// Each side is taken from its formation enthalpy at 298.15 K and heated to
/// `kelvin`; the amounts of the given species set the stoichiometry. Negative
/// values are exothermic.
pub fn reaction_enthalpy(reactants: &[Species], products: &[Species], kelvin: f64) -> ThermoResult<f64> {
    Ok(side_enthalpy(products, kelvin)? - side_enthalpy(reactants, kelvin)?)
}

fn side_enthalpy(side: &[Species], kelvin: f64) -> ThermoResult<f64> {
    side.iter().try_fold(0.0, |acc, s| {
        let mut at_reference = s.clone();
        at_reference.set_temperature(REFERENCE_KELVIN)?;
        Ok(acc + s.moles() * s.delta_h_formation()? + at_reference.heat_energy(kelvin)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::species;
    use crate::error::ThermoError;

    fn amount(id: &str, moles: f64) -> Species {
        species(id).unwrap().with_moles(moles).unwrap()
    }

    #[test]
    fn carbon_combustion_at_standard_temperature() {
        let dh = reaction_enthalpy(
            &[amount("C", 1.0), amount("O2", 1.0)],
            &[amount("CO2", 1.0)],
            REFERENCE_KELVIN,
        )
        .unwrap();
        assert!((dh + 393_510.0).abs() < 1e-6);
    }

    #[test]
    fn sensible_heat_enters_at_temperature() {
        let reactants = [amount("Fe", 2.0), amount("O2", 1.0)];
        let products = [amount("FeO", 2.0)];
        let standard = reaction_enthalpy(&reactants, &products, REFERENCE_KELVIN).unwrap();
        let hot = reaction_enthalpy(&reactants, &products, 1000.0).unwrap();

        let sensible = |s: &Species| {
            s.clone()
                .at(REFERENCE_KELVIN)
                .unwrap()
                .heat_energy(1000.0)
                .unwrap()
        };
        let expected = sensible(&products[0]) - sensible(&reactants[0]) - sensible(&reactants[1]);
        assert!((standard + 544_000.0).abs() < 1e-6);
        assert!((hot - standard - expected).abs() < 1e-6);
    }

    #[test]
    fn missing_formation_enthalpy_is_error() {
        let result = reaction_enthalpy(&[amount("CaO", 1.0)], &[amount("CaO", 1.0)], 500.0);
        assert!(matches!(
            result,
            Err(ThermoError::FormationEnthalpyNotSet { .. })
        ));
    }
}
