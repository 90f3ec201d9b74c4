//! Structural checks run while a system is assembled.

use sf_core::SfError;

use crate::arena::FlowArena;
use crate::device::{Device, DeviceKind, Direction, FlowRole};
use crate::error::{GraphError, GraphResult};
use crate::graph::Network;

/// A new slot must not reuse a name or a role on the same side of the device.
pub(crate) fn check_slot(
    device: &Device,
    direction: Direction,
    name: &str,
    role: Option<FlowRole>,
) -> GraphResult<()> {
    let slots = device.slots(direction);
    if slots.iter().any(|s| s.name == name) {
        return Err(GraphError::DuplicateSlot {
            device: device.name().to_string(),
            direction,
            slot: name.to_string(),
        });
    }
    if let Some(role) = role {
        if slots.iter().any(|s| s.role == Some(role)) {
            return Err(GraphError::DuplicateRole {
                device: device.name().to_string(),
                direction,
                role,
            });
        }
    }
    Ok(())
}

/// Every edge must appear as an output slot of its source and an input slot of
/// its destination, every slot must reference a stored flow, and boundary
/// devices may only connect on their one side.
pub(crate) fn validate_network(network: &Network, flows: &FlowArena) -> GraphResult<()> {
    for edge in network.edges() {
        flows.get(edge.flow)?;
        let from = network.device_by_id(edge.from)?;
        let to = network.device_by_id(edge.to)?;
        if !from.outputs().iter().any(|s| s.flow == edge.flow) {
            return Err(SfError::Invariant {
                what: "edge missing from its source device outputs",
            }
            .into());
        }
        if !to.inputs().iter().any(|s| s.flow == edge.flow) {
            return Err(SfError::Invariant {
                what: "edge missing from its destination device inputs",
            }
            .into());
        }
    }

    for device in network.devices() {
        let one_sided = match device.kind() {
            DeviceKind::Process => true,
            DeviceKind::BoundaryInput => device.inputs().is_empty(),
            DeviceKind::BoundaryOutput => device.outputs().is_empty(),
        };
        if !one_sided {
            return Err(SfError::Invariant {
                what: "boundary device connected on both sides",
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Slot;
    use sf_core::Id;

    #[test]
    fn duplicate_names_and_roles_rejected() {
        let mut device = Device::new(Id::from_index(0).unwrap(), "eaf", DeviceKind::Process);
        device.inputs.push(Slot {
            name: "dri".into(),
            flow: Id::from_index(0).unwrap(),
            role: Some(FlowRole::Dri),
        });

        assert!(matches!(
            check_slot(&device, Direction::Input, "dri", None),
            Err(GraphError::DuplicateSlot { .. })
        ));
        assert!(matches!(
            check_slot(&device, Direction::Input, "hot dri", Some(FlowRole::Dri)),
            Err(GraphError::DuplicateRole { .. })
        ));
        // Outputs are a separate namespace.
        assert!(check_slot(&device, Direction::Output, "dri", Some(FlowRole::Dri)).is_ok());
    }
}
