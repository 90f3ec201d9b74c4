//! Integration tests for sf-graph.

use sf_graph::{FlowRole, GraphError, SystemBuilder};
use sf_thermo::{EnergyFlow, Flow, Mixture, Species, ThermoError, catalog};

fn species_at(id: &str, moles: f64, kelvin: f64) -> Species {
    catalog::species(id)
        .unwrap()
        .with_moles(moles)
        .unwrap()
        .at(kelvin)
        .unwrap()
}

#[test]
fn flows_are_shared_between_producer_and_consumer() {
    let mut builder = SystemBuilder::new("chain");
    builder.add_device("furnace").unwrap();
    builder.add_device("caster").unwrap();
    builder
        .add_flow(
            Some("furnace"),
            Some("caster"),
            species_at("Fe", 10.0, 1900.0),
            Some(FlowRole::Steel),
        )
        .unwrap();
    let mut system = builder.build().unwrap();

    system
        .output_by_role_mut("furnace", FlowRole::Steel)
        .unwrap()
        .set_temperature(1850.0)
        .unwrap();

    let seen = system.input("caster", "Fe").unwrap().temperature().unwrap();
    assert_eq!(seen, 1850.0);
    let by_edge = system.get_flow("furnace", "caster", "Fe").unwrap();
    assert_eq!(by_edge.temperature().unwrap(), 1850.0);
}

#[test]
fn boundary_lookups() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("eaf").unwrap();
    builder
        .add_input("eaf", EnergyFlow::new("electricity", 1.0), Some(FlowRole::Electricity))
        .unwrap();
    builder
        .add_output("eaf", EnergyFlow::new("losses", 1.0), Some(FlowRole::Losses))
        .unwrap();
    let system = builder.build().unwrap();

    assert_eq!(system.get_input("eaf", "electricity").unwrap().energy().unwrap(), 1.0);
    assert!(system.get_output("eaf", "losses").is_ok());
    assert!(matches!(
        system.get_input("eaf", "losses"),
        Err(GraphError::FlowNotFound { .. })
    ));
    assert!(system.validate_balances(1e-9).is_ok());
    assert_eq!(system.balances().unwrap().len(), 1);
}

#[test]
fn cloning_snapshots_flows_and_parameters() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("eaf").unwrap();
    builder
        .add_input("eaf", EnergyFlow::new("electricity", 1.0), None)
        .unwrap();
    builder.set_parameter("o2 injection kg", 0.0);
    let original = builder.build().unwrap();

    let mut copy = original.clone();
    copy.params_mut().set("o2 injection kg", 5.0);
    copy.get_input_mut("eaf", "electricity")
        .unwrap()
        .as_energy_mut()
        .unwrap()
        .set_energy(7.0)
        .unwrap();

    assert_eq!(original.params().get("o2 injection kg"), Some(0.0));
    assert_eq!(
        original.get_input("eaf", "electricity").unwrap().energy().unwrap(),
        1.0
    );
    assert!(std::ptr::eq(original.network(), copy.network()));
}

#[test]
fn unbalanced_device_reported() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("heater").unwrap();
    builder
        .add_input("heater", species_at("H2O", 1.0, 298.15), Some(FlowRole::Water))
        .unwrap();
    builder
        .add_output("heater", species_at("H2O", 1.0, 373.15), Some(FlowRole::Water))
        .unwrap();
    let system = builder.build().unwrap();

    assert!(system.mass_balance("heater").unwrap().abs() < 1e-12);
    let err = system.validate_balances(1e-4).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Unbalanced {
            quantity: "Energy",
            ..
        }
    ));
}

#[test]
fn join_merges_inputs_into_its_output() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("join").unwrap();
    let gas_a = Mixture::new("gas a", vec![species_at("H2", 2.0, 600.0)]).unwrap();
    let gas_b = Mixture::new(
        "gas b",
        vec![species_at("H2", 1.0, 400.0), species_at("H2O", 1.0, 400.0)],
    )
    .unwrap();
    builder.add_input("join", gas_a, None).unwrap();
    builder.add_input("join", gas_b, None).unwrap();
    builder
        .add_output("join", Mixture::empty("h2 rich gas"), Some(FlowRole::H2RichGas))
        .unwrap();
    let mut system = builder.build().unwrap();

    system.merge_join("join").unwrap();

    let out = system
        .output_by_role("join", FlowRole::H2RichGas)
        .unwrap()
        .as_mixture()
        .unwrap();
    assert_eq!(out.name(), "h2 rich gas");
    assert_eq!(out.num_species(), 2);
    assert!((out.species_named("H2").unwrap().moles() - 3.0).abs() < 1e-12);
    assert!(system.mass_balance("join").unwrap().abs() < 1e-12);
    assert!(system.energy_balance("join").unwrap().abs() < 1e-6);
}

#[test]
fn join_requires_one_output() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("split").unwrap();
    builder
        .add_output("split", Flow::from(EnergyFlow::zero("a")), None)
        .unwrap();
    builder
        .add_output("split", Flow::from(EnergyFlow::zero("b")), None)
        .unwrap();
    let mut system = builder.build().unwrap();
    assert!(matches!(
        system.merge_join("split"),
        Err(GraphError::InvalidJoin { outputs: 2, .. })
    ));
}

#[test]
fn join_into_a_species_output_keeps_its_name() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("join").unwrap();
    let recycle = Mixture::new("recycle", vec![species_at("H2", 1.0, 400.0)]).unwrap();
    builder
        .add_input("join", species_at("H2", 2.0, 600.0), None)
        .unwrap();
    builder.add_input("join", recycle, None).unwrap();
    let mut hydrogen = species_at("H2", 0.0, 298.15);
    hydrogen.set_name("hydrogen");
    builder
        .add_output("join", hydrogen, None)
        .unwrap();
    let mut system = builder.build().unwrap();

    system.merge_join("join").unwrap();

    let out = system.output("join", "hydrogen").unwrap().as_species().unwrap();
    assert_eq!(out.name(), "hydrogen");
    assert!((out.moles() - 3.0).abs() < 1e-12);
    let kelvin = out.temperature().unwrap();
    assert!(kelvin > 400.0 && kelvin < 600.0);
    assert!(system.mass_balance("join").unwrap().abs() < 1e-12);
    assert!(system.energy_balance("join").unwrap().abs() < 1e-6);
}

#[test]
fn join_of_empty_inputs_empties_a_species_output() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("join").unwrap();
    let mut a = species_at("H2", 0.0, 500.0);
    a.set_name("hydrogen a");
    let mut b = species_at("H2", 0.0, 500.0);
    b.set_name("hydrogen b");
    builder.add_input("join", a, None).unwrap();
    builder.add_input("join", b, None).unwrap();
    builder
        .add_output("join", species_at("H2", 5.0, 700.0), None)
        .unwrap();
    let mut system = builder.build().unwrap();

    system.merge_join("join").unwrap();

    let out = system.output("join", "H2").unwrap();
    assert_eq!(out.moles().unwrap(), 0.0);
    assert_eq!(out.name(), "H2");
}

#[test]
fn join_of_different_species_into_a_species_output_fails() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("join").unwrap();
    builder
        .add_input("join", species_at("H2", 1.0, 500.0), None)
        .unwrap();
    builder
        .add_input("join", species_at("N2", 1.0, 500.0), None)
        .unwrap();
    let mut out = species_at("H2", 0.0, 298.15);
    out.set_name("product");
    builder.add_output("join", out, None).unwrap();
    let mut system = builder.build().unwrap();

    assert!(matches!(
        system.merge_join("join"),
        Err(GraphError::Thermo(ThermoError::NotSupported { .. }))
    ));
}

#[test]
fn join_sums_energy_inputs() {
    let mut builder = SystemBuilder::new("plant");
    builder.add_device("busbar").unwrap();
    builder
        .add_input("busbar", Flow::from(EnergyFlow::new("grid", 10.0)), None)
        .unwrap();
    builder
        .add_input("busbar", Flow::from(EnergyFlow::new("turbine", 5.0)), None)
        .unwrap();
    builder
        .add_output("busbar", Flow::from(EnergyFlow::zero("electricity")), None)
        .unwrap();
    let mut system = builder.build().unwrap();

    system.merge_join("busbar").unwrap();

    assert_eq!(
        system.output("busbar", "electricity").unwrap().energy().unwrap(),
        15.0
    );
    assert!(system.energy_balance("busbar").unwrap().abs() < 1e-12);
}
