//! Incremental system builder.

use std::sync::Arc;

use sf_core::{DeviceId, FlowId, Id};
use sf_thermo::Flow;

use crate::arena::FlowArena;
use crate::device::{Device, DeviceKind, Direction, FlowRole, Slot};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, INPUT_SUFFIX, Network, OUTPUT_SUFFIX};
use crate::params::Parameters;
use crate::system::System;
use crate::validate;

/// Builder for constructing a system incrementally.
///
/// Devices are declared with `add_device`, then connected with `add_flow`
/// (or bound to the system boundary with `add_input` / `add_output`).
/// `build()` validates the result and freezes the topology.
#[derive(Debug, Default)]
pub struct SystemBuilder {
    name: String,
    network: Network,
    flows: FlowArena,
    params: Parameters,
}

impl SystemBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a process device and return its ID.
    pub fn add_device(&mut self, name: impl Into<String>) -> GraphResult<DeviceId> {
        self.insert_device(name.into(), DeviceKind::Process)
    }

    /// Connect `from` to `to` with a new flow. A missing endpoint binds the flow
    /// to a virtual boundary device of the other endpoint.
    pub fn add_flow(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        flow: impl Into<Flow>,
        role: Option<FlowRole>,
    ) -> GraphResult<FlowId> {
        let flow = flow.into();
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (self.lookup(from)?, self.lookup(to)?),
            (None, Some(to)) => {
                let to = self.lookup(to)?;
                (self.boundary(to, DeviceKind::BoundaryInput)?, to)
            }
            (Some(from), None) => {
                let from = self.lookup(from)?;
                (from, self.boundary(from, DeviceKind::BoundaryOutput)?)
            }
            (None, None) => {
                return Err(GraphError::DanglingFlow {
                    flow: flow.name().to_string(),
                });
            }
        };

        let name = flow.name().to_string();
        let source = &self.network.devices[from.slot()];
        let sink = &self.network.devices[to.slot()];
        if self.network.index.edge(from, to, &name).is_some() {
            return Err(GraphError::DuplicateFlow {
                from: source.name().to_string(),
                to: sink.name().to_string(),
                flow: name,
            });
        }
        validate::check_slot(source, Direction::Output, &name, role)?;
        validate::check_slot(sink, Direction::Input, &name, role)?;

        let id = self.flows.insert(flow)?;
        self.network.index.insert_edge(from, to, &name, id);
        for (device, direction) in [(from, Direction::Output), (to, Direction::Input)] {
            self.network.devices[device.slot()]
                .slots_mut(direction)
                .push(Slot {
                    name: name.clone(),
                    flow: id,
                    role,
                });
        }
        self.network.edges.push(Edge {
            from,
            to,
            flow: id,
            name,
        });
        Ok(id)
    }

    /// Bind a flow entering the system at `to`.
    pub fn add_input(
        &mut self,
        to: &str,
        flow: impl Into<Flow>,
        role: Option<FlowRole>,
    ) -> GraphResult<FlowId> {
        self.add_flow(None, Some(to), flow, role)
    }

    /// Bind a flow leaving the system at `from`.
    pub fn add_output(
        &mut self,
        from: &str,
        flow: impl Into<Flow>,
        role: Option<FlowRole>,
    ) -> GraphResult<FlowId> {
        self.add_flow(Some(from), None, flow, role)
    }

    pub fn with_parameters(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.params.set(name, value);
        self
    }

    /// Validate and freeze the topology.
    pub fn build(self) -> GraphResult<System> {
        validate::validate_network(&self.network, &self.flows)?;
        tracing::debug!(
            system = %self.name,
            devices = self.network.devices.len(),
            flows = self.flows.len(),
            "system built"
        );
        Ok(System::from_parts(
            self.name,
            Arc::new(self.network),
            self.flows,
            self.params,
        ))
    }

    fn insert_device(&mut self, name: String, kind: DeviceKind) -> GraphResult<DeviceId> {
        let id = Id::from_index(self.network.devices.len())?;
        if !self.network.index.insert_device(&name, id) {
            return Err(GraphError::DuplicateDevice { name });
        }
        self.network.devices.push(Device::new(id, name, kind));
        Ok(id)
    }

    fn lookup(&self, name: &str) -> GraphResult<DeviceId> {
        self.network
            .index
            .device(name)
            .ok_or_else(|| GraphError::UnknownDevice {
                name: name.to_string(),
            })
    }

    /// The boundary device attached to `device`, created on first use.
    fn boundary(&mut self, device: DeviceId, kind: DeviceKind) -> GraphResult<DeviceId> {
        let suffix = match kind {
            DeviceKind::BoundaryInput => INPUT_SUFFIX,
            _ => OUTPUT_SUFFIX,
        };
        let name = format!("{}{suffix}", self.network.devices[device.slot()].name());
        match self.network.index.device(&name) {
            Some(id) => Ok(id),
            None => self.insert_device(name, kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_thermo::EnergyFlow;

    fn energy(name: &str) -> Flow {
        Flow::from(EnergyFlow::zero(name))
    }

    #[test]
    fn builder_basic() {
        let mut builder = SystemBuilder::new("plant");
        let a = builder.add_device("a").unwrap();
        let b = builder.add_device("b").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);

        let f = builder.add_flow(Some("a"), Some("b"), energy("heat"), None).unwrap();
        assert_eq!(f.index(), 0);
        assert_eq!(builder.network.edges.len(), 1);
        assert_eq!(builder.network.devices[0].outputs[0].flow, f);
        assert_eq!(builder.network.devices[1].inputs[0].flow, f);
    }

    #[test]
    fn boundary_devices_created_once() {
        let mut builder = SystemBuilder::new("plant");
        builder.add_device("eaf").unwrap();
        builder.add_input("eaf", energy("electricity"), None).unwrap();
        builder.add_input("eaf", energy("chemical"), None).unwrap();
        builder.add_output("eaf", energy("losses"), None).unwrap();

        let names: Vec<_> = builder.network.devices.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, ["eaf", "eaf __dummyinput__", "eaf __dummyoutput__"]);
        assert_eq!(builder.network.devices[1].kind(), DeviceKind::BoundaryInput);
        assert_eq!(builder.network.devices[1].outputs.len(), 2);
    }

    #[test]
    fn construction_errors() {
        let mut builder = SystemBuilder::new("plant");
        builder.add_device("a").unwrap();
        builder.add_device("b").unwrap();

        assert!(matches!(
            builder.add_device("a"),
            Err(GraphError::DuplicateDevice { .. })
        ));
        assert!(matches!(
            builder.add_flow(Some("a"), Some("missing"), energy("x"), None),
            Err(GraphError::UnknownDevice { .. })
        ));
        assert!(matches!(
            builder.add_flow(None, None, energy("x"), None),
            Err(GraphError::DanglingFlow { .. })
        ));

        builder.add_flow(Some("a"), Some("b"), energy("x"), None).unwrap();
        assert!(matches!(
            builder.add_flow(Some("a"), Some("b"), energy("x"), None),
            Err(GraphError::DuplicateFlow { .. })
        ));
        // Same name from a different source still collides on b's inputs.
        assert!(matches!(
            builder.add_input("b", energy("x"), None),
            Err(GraphError::DuplicateSlot { .. })
        ));
        // Rejected flows leave no trace in the arena or the edge index.
        let system = builder.build().unwrap();
        assert_eq!(system.flows().len(), 1);
        let (id, _) = system.flows().iter().next().unwrap();
        assert_eq!(system.network().edge("a", "b", "x").unwrap(), id);
    }
}
