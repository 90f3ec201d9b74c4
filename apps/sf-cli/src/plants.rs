//! Small demonstration plants and the physics that solves them.

use sf_core::FlowId;
use sf_graph::{FlowRole, GraphResult, System, SystemBuilder};
use sf_solver::{BalanceOptions, PhysicsResult, Signal, solve_exit_temperature};
use sf_thermo::{EnergyFlow, Mixture, Species, ThermoResult, catalog};

pub const HEATER_EFFICIENCY: &str = "heater efficiency";
pub const HOT_METAL_CARBON: &str = "bof hot metal C perc";
pub const PLASMA_RATIO: &str = "plasma h2 excess ratio";

const MELT_KELVIN: f64 = 1600.0;

fn water(name: &str, moles: f64) -> ThermoResult<Species> {
    let mut water = catalog::species("H2O")?.with_moles(moles)?.at(298.15)?;
    water.set_name(name);
    Ok(water)
}

/// Feed water through a preheater into an electric heater.
pub fn water_heater(moles: f64, efficiency: f64) -> GraphResult<System> {
    let mut builder = SystemBuilder::new("water heater");
    builder.add_device("preheater")?;
    builder.add_device("heater")?;
    builder.add_input("preheater", water("feed water", moles)?, Some(FlowRole::Water))?;
    builder.add_flow(
        Some("preheater"),
        Some("heater"),
        water("warm water", moles)?,
        Some(FlowRole::Water),
    )?;
    builder.add_input("heater", EnergyFlow::zero("electricity"), Some(FlowRole::Electricity))?;
    builder.add_output("heater", EnergyFlow::zero("losses"), Some(FlowRole::Losses))?;
    builder.add_output("heater", water("hot water", moles)?, Some(FlowRole::Product))?;
    builder.set_parameter(HEATER_EFFICIENCY, efficiency);
    builder.build()
}

/// Heat the water to `target` and size the electricity for the efficiency.
pub fn heater_physics(target: f64) -> impl Fn(&mut System) -> PhysicsResult<()> + Sync {
    move |system: &mut System| {
        let efficiency = system.params().require(HEATER_EFFICIENCY)?;
        system
            .output_by_role_mut("heater", FlowRole::Product)?
            .set_temperature(target)?;
        let heat = system
            .input_by_role("heater", FlowRole::Water)?
            .heat_energy(target)?;
        let electricity = heat / efficiency;
        system
            .input_by_role_mut("heater", FlowRole::Electricity)?
            .as_energy_mut()?
            .set_energy(electricity)?;
        system
            .output_by_role_mut("heater", FlowRole::Losses)?
            .as_energy_mut()?
            .set_energy((1.0 - efficiency) * electricity)?;
        Ok(())
    }
}

fn hot_metal(name: &str, iron_moles: f64) -> ThermoResult<Mixture> {
    let iron = catalog::species("Fe")?.with_moles(iron_moles)?;
    let carbon = catalog::species("C")?;
    let mut mixture = Mixture::new(name, vec![iron, carbon])?;
    mixture.set_temperature(MELT_KELVIN)?;
    Ok(mixture)
}

/// Hot metal into a converter; the steel leaves with the same composition.
pub fn converter(carbon_perc: f64) -> GraphResult<System> {
    let mut builder = SystemBuilder::new(format!("converter {carbon_perc}"));
    builder.add_device("bof")?;
    builder.add_input("bof", hot_metal("hot metal", 1000.0)?, Some(FlowRole::HotMetal))?;
    builder.add_output("bof", hot_metal("steel", 1000.0)?, Some(FlowRole::Steel))?;
    builder.set_parameter(HOT_METAL_CARBON, carbon_perc);
    builder.build()
}

/// Hot metal below `threshold` percent carbon cannot be blown.
pub fn converter_physics(threshold: f64) -> impl Fn(&mut System) -> PhysicsResult<()> + Sync {
    move |system: &mut System| {
        let perc = system.params().require(HOT_METAL_CARBON)?;
        if perc < threshold {
            return Err(Signal::IncreaseCInHotMetal.into());
        }
        let ids = [
            system.device("bof")?.input_by_role(FlowRole::HotMetal)?,
            system.device("bof")?.output_by_role(FlowRole::Steel)?,
        ];
        for id in ids {
            let mixture = system.flow_mut(id)?.as_mixture_mut()?;
            let iron = mixture.species_named("Fe")?.mass();
            mixture
                .species_named_mut("C")?
                .set_mass(iron * perc / (100.0 - perc))?;
            mixture.set_temperature(MELT_KELVIN)?;
        }
        Ok(())
    }
}

/// Hydrogen heated by an arc whose power scales with the excess ratio.
pub fn plasma_smelter(losses: f64) -> GraphResult<(System, FlowId)> {
    let hydrogen =
        || -> ThermoResult<Species> { catalog::species("H2")?.with_moles(10.0)?.at(298.15) };
    let mut builder = SystemBuilder::new("plasma smelter");
    builder.add_device("plasma smelter")?;
    builder.add_input("plasma smelter", hydrogen()?, Some(FlowRole::H2RichGas))?;
    builder.add_input(
        "plasma smelter",
        EnergyFlow::zero("electricity"),
        Some(FlowRole::Electricity),
    )?;
    builder.add_output(
        "plasma smelter",
        EnergyFlow::new("losses", losses),
        Some(FlowRole::Losses),
    )?;
    let off_gas = builder.add_output("plasma smelter", hydrogen()?, Some(FlowRole::OffGas))?;
    builder.set_parameter(PLASMA_RATIO, 1.0);
    Ok((builder.build()?, off_gas))
}

/// Solve the off-gas temperature; below `options.floor` the ratio is raised.
pub fn plasma_physics(
    off_gas: FlowId,
    options: BalanceOptions,
) -> impl Fn(&mut System) -> PhysicsResult<()> + Sync {
    move |system: &mut System| {
        let ratio = system.params().require(PLASMA_RATIO)?;
        system
            .input_by_role_mut("plasma smelter", FlowRole::Electricity)?
            .as_energy_mut()?
            .set_energy(100_000.0 * ratio)?;
        solve_exit_temperature(system, "plasma smelter", off_gas, &options)?;
        Ok(())
    }
}
