//! Devices: named process units with input and output flow slots.

use serde::{Deserialize, Serialize};
use sf_core::{DeviceId, FlowId, REFERENCE_KELVIN, is_negligible};

use crate::arena::FlowArena;
use crate::error::{GraphError, GraphResult};

/// Side of a device a slot sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// Typed tag for what a flow carries, attached when the flow is connected.
///
/// A role is unique per device and direction, so role lookups never match
/// more than one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRole {
    H2RichGas,
    Ore,
    Dri,
    HotMetal,
    Steel,
    Slag,
    Flux,
    Carbon,
    Oxygen,
    Scrap,
    Air,
    OffGas,
    Water,
    Electricity,
    ChemicalEnergy,
    Losses,
    Product,
    Feed,
}

impl FlowRole {
    pub fn label(self) -> &'static str {
        match self {
            FlowRole::H2RichGas => "h2 rich gas",
            FlowRole::Ore => "ore",
            FlowRole::Dri => "dri",
            FlowRole::HotMetal => "hot metal",
            FlowRole::Steel => "steel",
            FlowRole::Slag => "slag",
            FlowRole::Flux => "flux",
            FlowRole::Carbon => "carbon",
            FlowRole::Oxygen => "oxygen",
            FlowRole::Scrap => "scrap",
            FlowRole::Air => "air",
            FlowRole::OffGas => "off gas",
            FlowRole::Water => "water",
            FlowRole::Electricity => "electricity",
            FlowRole::ChemicalEnergy => "chemical energy",
            FlowRole::Losses => "losses",
            FlowRole::Product => "product",
            FlowRole::Feed => "feed",
        }
    }
}

impl std::fmt::Display for FlowRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// A real process unit whose balances must close.
    Process,
    /// Virtual source for flows entering the system.
    BoundaryInput,
    /// Virtual sink for flows leaving the system.
    BoundaryOutput,
}

/// One connected flow as seen from a device.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    pub flow: FlowId,
    pub role: Option<FlowRole>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub(crate) id: DeviceId,
    pub(crate) name: String,
    pub(crate) kind: DeviceKind,
    pub(crate) inputs: Vec<Slot>,
    pub(crate) outputs: Vec<Slot>,
}

impl Device {
    pub(crate) fn new(id: DeviceId, name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn is_boundary(&self) -> bool {
        self.kind != DeviceKind::Process
    }

    pub fn inputs(&self) -> &[Slot] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Slot] {
        &self.outputs
    }

    pub fn slots(&self, direction: Direction) -> &[Slot] {
        match direction {
            Direction::Input => &self.inputs,
            Direction::Output => &self.outputs,
        }
    }

    pub(crate) fn slots_mut(&mut self, direction: Direction) -> &mut Vec<Slot> {
        match direction {
            Direction::Input => &mut self.inputs,
            Direction::Output => &mut self.outputs,
        }
    }

    pub fn input(&self, name: &str) -> GraphResult<FlowId> {
        self.slot_named(Direction::Input, name)
    }

    pub fn output(&self, name: &str) -> GraphResult<FlowId> {
        self.slot_named(Direction::Output, name)
    }

    pub fn input_by_role(&self, role: FlowRole) -> GraphResult<FlowId> {
        self.slot_by_role(Direction::Input, role)
    }

    pub fn output_by_role(&self, role: FlowRole) -> GraphResult<FlowId> {
        self.slot_by_role(Direction::Output, role)
    }

    /// The unique input whose name contains `pattern`.
    pub fn first_input_containing_name(&self, pattern: &str) -> GraphResult<FlowId> {
        self.slot_containing(Direction::Input, pattern)
    }

    /// The unique output whose name contains `pattern`.
    pub fn first_output_containing_name(&self, pattern: &str) -> GraphResult<FlowId> {
        self.slot_containing(Direction::Output, pattern)
    }

    /// Output mass minus input mass [kg].
    pub fn mass_balance(&self, flows: &FlowArena) -> GraphResult<f64> {
        Ok(mass_sum(&self.outputs, flows)? - mass_sum(&self.inputs, flows)?)
    }

    /// Output minus input enthalpy of chemical flows, each measured above 298.15 K [J].
    pub fn thermal_energy_balance(&self, flows: &FlowArena) -> GraphResult<f64> {
        Ok(enthalpy_sum(&self.outputs, flows)? - enthalpy_sum(&self.inputs, flows)?)
    }

    /// Thermal balance plus output minus input energy flows [J].
    pub fn energy_balance(&self, flows: &FlowArena) -> GraphResult<f64> {
        Ok(self.thermal_energy_balance(flows)? + energy_sum(&self.outputs, flows)?
            - energy_sum(&self.inputs, flows)?)
    }

    fn slot_named(&self, direction: Direction, name: &str) -> GraphResult<FlowId> {
        self.slots(direction)
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.flow)
            .ok_or_else(|| GraphError::SlotNotFound {
                device: self.name.clone(),
                direction,
                slot: name.to_string(),
            })
    }

    fn slot_by_role(&self, direction: Direction, role: FlowRole) -> GraphResult<FlowId> {
        self.slots(direction)
            .iter()
            .find(|s| s.role == Some(role))
            .map(|s| s.flow)
            .ok_or_else(|| GraphError::RoleNotFound {
                device: self.name.clone(),
                direction,
                role,
            })
    }

    fn slot_containing(&self, direction: Direction, pattern: &str) -> GraphResult<FlowId> {
        let matches: Vec<&Slot> = self
            .slots(direction)
            .iter()
            .filter(|s| s.name.contains(pattern))
            .collect();
        match matches.as_slice() {
            [only] => Ok(only.flow),
            [] => Err(GraphError::NoMatch {
                device: self.name.clone(),
                direction,
                pattern: pattern.to_string(),
            }),
            many => Err(GraphError::AmbiguousMatch {
                device: self.name.clone(),
                direction,
                pattern: pattern.to_string(),
                count: many.len(),
            }),
        }
    }
}

fn mass_sum(slots: &[Slot], flows: &FlowArena) -> GraphResult<f64> {
    slots
        .iter()
        .try_fold(0.0, |acc, s| Ok(acc + flows.get(s.flow)?.mass()))
}

fn enthalpy_sum(slots: &[Slot], flows: &FlowArena) -> GraphResult<f64> {
    slots.iter().try_fold(0.0, |acc, s| {
        let flow = flows.get(s.flow)?;
        // Empty flows may not have a temperature yet.
        if !flow.is_chemical() || is_negligible(flow.mass()) {
            return Ok(acc);
        }
        Ok(acc + flow.enthalpy_above(REFERENCE_KELVIN)?)
    })
}

fn energy_sum(slots: &[Slot], flows: &FlowArena) -> GraphResult<f64> {
    slots.iter().try_fold(0.0, |acc, s| {
        let flow = flows.get(s.flow)?;
        if flow.is_chemical() {
            Ok(acc)
        } else {
            Ok(acc + flow.energy()?)
        }
    })
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |slots: &[Slot]| {
            slots
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(f, "Device {}:", self.name)?;
        writeln!(f, "  Inputs: {}", names(&self.inputs))?;
        write!(f, "  Outputs: {}", names(&self.outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::Id;
    use sf_thermo::{EnergyFlow, Flow, catalog};

    fn water(moles: f64, kelvin: f64) -> Flow {
        let mut w = catalog::species("H2O").unwrap().with_moles(moles).unwrap();
        w.set_temperature(kelvin).unwrap();
        Flow::from(w)
    }

    fn heater(flows: &mut FlowArena, electricity: f64) -> Device {
        let cold = flows.insert(water(1.0, 298.15)).unwrap();
        let power = flows.insert(Flow::from(EnergyFlow::new("electricity", electricity))).unwrap();
        let hot = flows.insert(water(1.0, 373.15)).unwrap();
        let mut device = Device::new(Id::from_index(0).unwrap(), "heater", DeviceKind::Process);
        device.inputs.push(Slot {
            name: "cold water".into(),
            flow: cold,
            role: Some(FlowRole::Water),
        });
        device.inputs.push(Slot {
            name: "electricity".into(),
            flow: power,
            role: Some(FlowRole::Electricity),
        });
        device.outputs.push(Slot {
            name: "hot water".into(),
            flow: hot,
            role: Some(FlowRole::Water),
        });
        device
    }

    #[test]
    fn balances_of_a_heater() {
        let mut flows = FlowArena::new();
        let device = heater(&mut flows, 75.36 * 75.0);
        assert!(device.mass_balance(&flows).unwrap().abs() < 1e-12);
        let thermal = device.thermal_energy_balance(&flows).unwrap();
        assert!((thermal - 75.36 * 75.0).abs() < 1e-6);
        assert!(device.energy_balance(&flows).unwrap().abs() < 1e-6);
    }

    #[test]
    fn empty_flows_without_temperature_are_skipped() {
        let mut flows = FlowArena::new();
        let mut device = heater(&mut flows, 75.36 * 75.0);
        let unset = flows.insert(Flow::from(catalog::species("N2").unwrap())).unwrap();
        device.outputs.push(Slot {
            name: "purge".into(),
            flow: unset,
            role: None,
        });
        assert!(device.energy_balance(&flows).unwrap().abs() < 1e-6);
    }

    #[test]
    fn lookups() {
        let mut flows = FlowArena::new();
        let device = heater(&mut flows, 0.0);
        assert!(device.input("electricity").is_ok());
        assert!(matches!(
            device.output("electricity"),
            Err(GraphError::SlotNotFound { .. })
        ));
        assert_eq!(
            device.input_by_role(FlowRole::Water).unwrap(),
            device.input("cold water").unwrap()
        );
        assert!(device.output_by_role(FlowRole::Losses).is_err());

        assert!(device.first_input_containing_name("elec").is_ok());
        assert!(matches!(
            device.first_input_containing_name("steam"),
            Err(GraphError::NoMatch { .. })
        ));
        assert!(matches!(
            device.first_input_containing_name("e"),
            Err(GraphError::AmbiguousMatch { count: 2, .. })
        ));
    }

    #[test]
    fn display_lists_flow_names() {
        let mut flows = FlowArena::new();
        let device = heater(&mut flows, 0.0);
        let text = device.to_string();
        assert!(text.starts_with("Device heater:"));
        assert!(text.contains("Inputs: cold water, electricity"));
        assert!(text.contains("Outputs: hot water"));
    }
}
