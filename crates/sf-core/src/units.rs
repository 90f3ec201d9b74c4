// sf-core/src/units.rs

use crate::error::{SfError, SfResult};
use uom::si::f64::{Energy as UomEnergy, ThermodynamicTemperature as UomThermodynamicTemperature};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Temperature = UomThermodynamicTemperature;

/// Reference temperature [K] that device enthalpy balances are measured against.
pub const REFERENCE_KELVIN: f64 = 298.15;

/// Baseline temperature [K] for flow merging and the start of most correlation tables.
pub const BASELINE_KELVIN: f64 = 298.0;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn joules(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

pub fn celsius_to_kelvin(celsius: f64) -> SfResult<f64> {
    use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};
    let absolute = Temperature::new::<degree_celsius>(celsius).get::<kelvin>();
    if absolute < 0.0 {
        return Err(SfError::Negative {
            what: "absolute temperature",
            value: absolute,
        });
    }
    Ok(absolute)
}

pub fn kelvin_to_celsius(kelvin: f64) -> SfResult<f64> {
    use uom::si::thermodynamic_temperature::degree_celsius;
    if kelvin < 0.0 {
        return Err(SfError::Negative {
            what: "absolute temperature",
            value: kelvin,
        });
    }
    Ok(k(kelvin).get::<degree_celsius>())
}

#[inline]
pub fn joules_to_kwh(j: f64) -> f64 {
    use uom::si::energy::kilowatt_hour;
    joules(j).get::<kilowatt_hour>()
}

#[inline]
pub fn kwh_to_joules(kwh: f64) -> f64 {
    use uom::si::energy::{joule, kilowatt_hour};
    Energy::new::<kilowatt_hour>(kwh).get::<joule>()
}
