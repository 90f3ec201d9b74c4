//! Name lookups for devices and flow edges.

use std::collections::HashMap;

use sf_core::{DeviceId, FlowId};

/// Bidirectional name <-> id mapping for devices, plus the edge key
/// `(from, to, flow name) -> FlowId`.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    devices: HashMap<String, DeviceId>,
    edges: HashMap<(DeviceId, DeviceId, String), FlowId>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(&self, name: &str) -> Option<DeviceId> {
        self.devices.get(name).copied()
    }

    pub fn edge(&self, from: DeviceId, to: DeviceId, flow: &str) -> Option<FlowId> {
        self.edges.get(&(from, to, flow.to_string())).copied()
    }

    /// Returns false when the name is already taken.
    pub(crate) fn insert_device(&mut self, name: &str, id: DeviceId) -> bool {
        if self.devices.contains_key(name) {
            return false;
        }
        self.devices.insert(name.to_string(), id);
        true
    }

    /// Callers check `edge` first; an existing key is overwritten.
    pub(crate) fn insert_edge(&mut self, from: DeviceId, to: DeviceId, flow: &str, id: FlowId) {
        self.edges.insert((from, to, flow.to_string()), id);
    }
}
