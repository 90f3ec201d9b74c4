//! Immutable network topology: devices and the flow edges between them.

use sf_core::{DeviceId, FlowId};

use crate::device::Device;
use crate::error::{GraphError, GraphResult};
use crate::indexing::NameIndex;

/// Suffix of the virtual device that feeds a device's system inputs.
pub const INPUT_SUFFIX: &str = " __dummyinput__";
/// Suffix of the virtual device that receives a device's system outputs.
pub const OUTPUT_SUFFIX: &str = " __dummyoutput__";

/// A directed edge carrying one flow from an output slot to an input slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: DeviceId,
    pub to: DeviceId,
    pub flow: FlowId,
    pub name: String,
}

/// Devices and edges of a system. Fixed after construction and shared
/// between clones of the system.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) devices: Vec<Device>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) index: NameIndex,
}

impl Network {
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Process devices only, in insertion order.
    pub fn process_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| !d.is_boundary())
    }

    pub fn device_by_id(&self, id: DeviceId) -> GraphResult<&Device> {
        self.devices
            .get(id.slot())
            .ok_or(GraphError::IdNotFound { what: "Device", id })
    }

    pub fn device(&self, name: &str) -> GraphResult<&Device> {
        let id = self
            .index
            .device(name)
            .ok_or_else(|| GraphError::UnknownDevice {
                name: name.to_string(),
            })?;
        self.device_by_id(id)
    }

    /// Flow handle of the edge `from -> to` named `flow`.
    pub fn edge(&self, from: &str, to: &str, flow: &str) -> GraphResult<FlowId> {
        let not_found = || GraphError::FlowNotFound {
            from: from.to_string(),
            to: to.to_string(),
            flow: flow.to_string(),
        };
        let from_id = self.index.device(from).ok_or_else(not_found)?;
        let to_id = self.index.device(to).ok_or_else(not_found)?;
        self.index.edge(from_id, to_id, flow).ok_or_else(not_found)
    }

    /// Flow handle of a system input to `device`.
    pub fn system_input(&self, device: &str, flow: &str) -> GraphResult<FlowId> {
        self.edge(&format!("{device}{INPUT_SUFFIX}"), device, flow)
    }

    /// Flow handle of a system output from `device`.
    pub fn system_output(&self, device: &str, flow: &str) -> GraphResult<FlowId> {
        self.edge(device, &format!("{device}{OUTPUT_SUFFIX}"), flow)
    }
}
