//! A system: shared topology plus the flow contents and parameters it owns.

use std::sync::Arc;

use serde::Serialize;
use sf_core::FlowId;
use sf_thermo::{Flow, Mixture};

use crate::arena::FlowArena;
use crate::device::{Device, FlowRole};
use crate::error::{GraphError, GraphResult};
use crate::graph::Network;
use crate::params::Parameters;

/// Everything inside the system boundary of one plant design.
///
/// Topology sits behind an `Arc`; cloning a system copies only the flow
/// arena and parameters, which is what a retry snapshot needs.
#[derive(Debug, Clone)]
pub struct System {
    name: String,
    network: Arc<Network>,
    flows: FlowArena,
    params: Parameters,
}

/// Mass and energy balance of one process device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceBalance {
    pub device: String,
    /// kg
    pub mass: f64,
    /// J
    pub energy: f64,
}

impl System {
    pub(crate) fn from_parts(
        name: String,
        network: Arc<Network>,
        flows: FlowArena,
        params: Parameters,
    ) -> Self {
        Self {
            name,
            network,
            flows,
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn devices(&self) -> &[Device] {
        self.network.devices()
    }

    pub fn device(&self, name: &str) -> GraphResult<&Device> {
        self.network.device(name)
    }

    pub fn flows(&self) -> &FlowArena {
        &self.flows
    }

    pub fn flow(&self, id: FlowId) -> GraphResult<&Flow> {
        self.flows.get(id)
    }

    pub fn flow_mut(&mut self, id: FlowId) -> GraphResult<&mut Flow> {
        self.flows.get_mut(id)
    }

    /// The flow on edge `from -> to` named `flow`.
    pub fn get_flow(&self, from: &str, to: &str, flow: &str) -> GraphResult<&Flow> {
        self.flows.get(self.network.edge(from, to, flow)?)
    }

    pub fn get_flow_mut(&mut self, from: &str, to: &str, flow: &str) -> GraphResult<&mut Flow> {
        let id = self.network.edge(from, to, flow)?;
        self.flows.get_mut(id)
    }

    /// A flow entering the system at `device`.
    pub fn get_input(&self, device: &str, flow: &str) -> GraphResult<&Flow> {
        self.flows.get(self.network.system_input(device, flow)?)
    }

    pub fn get_input_mut(&mut self, device: &str, flow: &str) -> GraphResult<&mut Flow> {
        let id = self.network.system_input(device, flow)?;
        self.flows.get_mut(id)
    }

    /// A flow leaving the system at `device`.
    pub fn get_output(&self, device: &str, flow: &str) -> GraphResult<&Flow> {
        self.flows.get(self.network.system_output(device, flow)?)
    }

    pub fn get_output_mut(&mut self, device: &str, flow: &str) -> GraphResult<&mut Flow> {
        let id = self.network.system_output(device, flow)?;
        self.flows.get_mut(id)
    }

    /// Input slot `slot` of `device`, wherever it comes from.
    pub fn input(&self, device: &str, slot: &str) -> GraphResult<&Flow> {
        self.flows.get(self.device(device)?.input(slot)?)
    }

    pub fn input_mut(&mut self, device: &str, slot: &str) -> GraphResult<&mut Flow> {
        let id = self.network.device(device)?.input(slot)?;
        self.flows.get_mut(id)
    }

    pub fn output(&self, device: &str, slot: &str) -> GraphResult<&Flow> {
        self.flows.get(self.device(device)?.output(slot)?)
    }

    pub fn output_mut(&mut self, device: &str, slot: &str) -> GraphResult<&mut Flow> {
        let id = self.network.device(device)?.output(slot)?;
        self.flows.get_mut(id)
    }

    pub fn input_by_role(&self, device: &str, role: FlowRole) -> GraphResult<&Flow> {
        self.flows.get(self.device(device)?.input_by_role(role)?)
    }

    pub fn input_by_role_mut(&mut self, device: &str, role: FlowRole) -> GraphResult<&mut Flow> {
        let id = self.network.device(device)?.input_by_role(role)?;
        self.flows.get_mut(id)
    }

    pub fn output_by_role(&self, device: &str, role: FlowRole) -> GraphResult<&Flow> {
        self.flows.get(self.device(device)?.output_by_role(role)?)
    }

    pub fn output_by_role_mut(&mut self, device: &str, role: FlowRole) -> GraphResult<&mut Flow> {
        let id = self.network.device(device)?.output_by_role(role)?;
        self.flows.get_mut(id)
    }

    pub fn first_input_containing_name(&self, device: &str, pattern: &str) -> GraphResult<&Flow> {
        self.flows
            .get(self.device(device)?.first_input_containing_name(pattern)?)
    }

    pub fn first_output_containing_name(&self, device: &str, pattern: &str) -> GraphResult<&Flow> {
        self.flows
            .get(self.device(device)?.first_output_containing_name(pattern)?)
    }

    pub fn mass_balance(&self, device: &str) -> GraphResult<f64> {
        self.device(device)?.mass_balance(&self.flows)
    }

    pub fn thermal_energy_balance(&self, device: &str) -> GraphResult<f64> {
        self.device(device)?.thermal_energy_balance(&self.flows)
    }

    pub fn energy_balance(&self, device: &str) -> GraphResult<f64> {
        self.device(device)?.energy_balance(&self.flows)
    }

    /// Balances of every process device, in declaration order.
    pub fn balances(&self) -> GraphResult<Vec<DeviceBalance>> {
        self.network
            .process_devices()
            .map(|d| {
                Ok(DeviceBalance {
                    device: d.name().to_string(),
                    mass: d.mass_balance(&self.flows)?,
                    energy: d.energy_balance(&self.flows)?,
                })
            })
            .collect()
    }

    pub fn validate_mass_balance(&self, tolerance: f64) -> GraphResult<()> {
        for device in self.network.process_devices() {
            check_balance(device, "Mass", device.mass_balance(&self.flows)?, tolerance)?;
        }
        Ok(())
    }

    pub fn validate_energy_balance(&self, tolerance: f64) -> GraphResult<()> {
        for device in self.network.process_devices() {
            check_balance(device, "Energy", device.energy_balance(&self.flows)?, tolerance)?;
        }
        Ok(())
    }

    /// Every process device within `tolerance` on both mass [kg] and energy [J].
    pub fn validate_balances(&self, tolerance: f64) -> GraphResult<()> {
        self.validate_energy_balance(tolerance)?;
        self.validate_mass_balance(tolerance)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    pub fn set_params(&mut self, params: Parameters) {
        self.params = params;
    }

    /// Recompute the single output of a join device from its inputs.
    ///
    /// A mixture output becomes the enthalpy-conserving merge of every input.
    /// A species output must stay one species; energy outputs are summed.
    pub fn merge_join(&mut self, device: &str) -> GraphResult<()> {
        let join = self.network.device(device)?;
        let [output] = join.outputs() else {
            return Err(GraphError::InvalidJoin {
                device: device.to_string(),
                outputs: join.outputs().len(),
            });
        };
        let output = output.flow;
        let inputs = join
            .inputs()
            .iter()
            .map(|s| self.flows.get(s.flow).cloned())
            .collect::<GraphResult<Vec<Flow>>>()?;

        match self.flows.get_mut(output)? {
            Flow::Mixture(target) => {
                let mut merged = Mixture::empty(target.name());
                for flow in &inputs {
                    merged.merge(flow)?;
                }
                target.set(&merged);
            }
            Flow::Species(target) => {
                let mut staged = Mixture::empty(target.name());
                for flow in &inputs {
                    staged.merge(flow)?;
                }
                match staged.species() {
                    [merged] => {
                        let name = target.name().to_string();
                        target.set(merged);
                        target.set_name(name);
                    }
                    [] => target.set_moles(0.0)?,
                    _ => {
                        return Err(sf_thermo::ThermoError::NotSupported {
                            what: "joining different species into a species flow",
                        }
                        .into());
                    }
                }
            }
            Flow::Energy(target) => {
                let total = inputs
                    .iter()
                    .map(Flow::energy)
                    .sum::<Result<f64, _>>()?;
                target.set_energy(total)?;
            }
        }
        Ok(())
    }
}

fn check_balance(
    device: &Device,
    quantity: &'static str,
    value: f64,
    tolerance: f64,
) -> GraphResult<()> {
    if value.abs() > tolerance || !value.is_finite() {
        return Err(GraphError::Unbalanced {
            device: device.name().to_string(),
            quantity,
            value,
            tolerance,
        });
    }
    Ok(())
}
