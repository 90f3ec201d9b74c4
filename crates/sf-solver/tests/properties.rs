use proptest::prelude::*;
use sf_core::FlowId;
use sf_graph::{FlowRole, System, SystemBuilder};
use sf_solver::{
    BalanceOptions, PhysicsResult, Signal, SolverConfig, solve_exit_temperature,
    solve_mass_energy_flow,
};
use sf_thermo::{EnergyFlow, catalog};

fn cooler(losses: f64) -> (System, FlowId) {
    let nitrogen = |kelvin: f64| {
        catalog::species("N2")
            .unwrap()
            .with_moles(5.0)
            .unwrap()
            .at(kelvin)
            .unwrap()
    };
    let mut builder = SystemBuilder::new("cooler");
    builder.add_device("cooler").unwrap();
    builder.add_input("cooler", nitrogen(1500.0), None).unwrap();
    builder
        .add_output("cooler", EnergyFlow::new("losses", losses), Some(FlowRole::Losses))
        .unwrap();
    let out = builder.add_output("cooler", nitrogen(1500.0), None).unwrap();
    (builder.build().unwrap(), out)
}

fn exit_temperature(losses: f64) -> f64 {
    let (mut system, out) = cooler(losses);
    solve_exit_temperature(&mut system, "cooler", out, &BalanceOptions::default())
        .unwrap()
        .temperature
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn more_losses_means_colder_exit(a in 0.0f64..100_000.0, b in 0.0f64..100_000.0) {
        prop_assume!((a - b).abs() > 1.0);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(exit_temperature(low) > exit_temperature(high));
    }

    #[test]
    fn retries_stop_at_first_feasible_value(start in 0.5f64..6.0) {
        const PARAM: &str = "bof hot metal C perc";
        let mut builder = SystemBuilder::new("bof");
        builder.add_device("bof").unwrap();
        builder.set_parameter(PARAM, start);
        let mut system = builder.build().unwrap();

        let mut physics = |s: &mut System| -> PhysicsResult<()> {
            if s.params().require(PARAM)? < 5.0 {
                return Err(Signal::IncreaseCInHotMetal.into());
            }
            Ok(())
        };
        let report = solve_mass_energy_flow(&mut system, &mut physics, &SolverConfig::default())
            .unwrap();

        let value = system.params().get(PARAM).unwrap();
        prop_assert!(value >= 5.0);
        prop_assert_eq!(report.attempts, report.retries() + 1);
        if report.retries() > 0 {
            prop_assert!(value / 1.05 < 5.0 + 1e-9);
        } else {
            prop_assert_eq!(value, start);
        }
    }
}
