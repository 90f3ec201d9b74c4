//! Local solver: the exit temperature that closes one device's energy balance.

use serde::{Deserialize, Serialize};
use sf_core::FlowId;
use sf_graph::System;
use sf_thermo::HeatCapacityBasis;

use crate::error::SolverError;
use crate::physics::{PhysicsError, PhysicsResult};
use crate::signal::Signal;

/// Lowest physically acceptable exit temperature and the signal raised when
/// a step would cross it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureFloor {
    pub kelvin: f64,
    pub signal: Signal,
}

/// Local solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceOptions {
    pub max_iterations: usize,
    /// Absolute tolerance on the energy residual [J]
    pub tolerance: f64,
    /// Starting temperature [K]; the flow's current temperature when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<TemperatureFloor>,
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 2e-5,
            initial_guess: None,
            floor: None,
        }
    }
}

impl BalanceOptions {
    pub fn with_initial_guess(mut self, kelvin: f64) -> Self {
        self.initial_guess = Some(kelvin);
        self
    }

    pub fn with_floor(mut self, kelvin: f64, signal: Signal) -> Self {
        self.floor = Some(TemperatureFloor { kelvin, signal });
        self
    }
}

/// Converged local solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceReport {
    pub temperature: f64,
    pub iterations: usize,
    /// Residual [J] at `temperature`
    pub residual: f64,
}

/// Find the temperature of output `flow` that zeroes `device`'s energy balance.
pub fn solve_exit_temperature(
    system: &mut System,
    device: &str,
    flow: FlowId,
    options: &BalanceOptions,
) -> PhysicsResult<BalanceReport> {
    solve_exit_temperature_with(system, device, flow, options, |_| Ok(0.0))
}

/// As [`solve_exit_temperature`], with `extra` added to the residual. `extra`
/// typically models losses that depend on the unknown temperature; its own
/// slope is not used for the step.
pub fn solve_exit_temperature_with<F>(
    system: &mut System,
    device: &str,
    flow: FlowId,
    options: &BalanceOptions,
    mut extra: F,
) -> PhysicsResult<BalanceReport>
where
    F: FnMut(&System) -> PhysicsResult<f64>,
{
    // The step sign assumes enthalpy leaves the device with the unknown flow.
    if !system.device(device)?.outputs().iter().any(|s| s.flow == flow) {
        return Err(SolverError::ProblemSetup {
            what: format!("flow {flow} is not an output of device {device}"),
        }
        .into());
    }
    if let Some(kelvin) = options.initial_guess {
        system.flow_mut(flow)?.set_temperature(kelvin)?;
    }
    check_floor(options, device, system.flow(flow)?.temperature()?)?;

    for iteration in 0..options.max_iterations {
        let residual = system.energy_balance(device)? + extra(&*system)?;
        let target = system.flow(flow)?;
        let kelvin = target.temperature()?;
        if residual.abs() < options.tolerance {
            tracing::debug!(device, kelvin, iteration, residual, "exit temperature converged");
            return Ok(BalanceReport {
                temperature: kelvin,
                iterations: iteration,
                residual,
            });
        }

        let slope = target.cp(HeatCapacityBasis::PerKilogram)? * target.mass();
        if !(slope.is_finite() && slope > 0.0) {
            return Err(SolverError::ConvergenceFailed {
                what: format!("exit flow of {device} has no heat capacity (slope {slope} J/K)"),
            }
            .into());
        }

        let next = kelvin - residual / slope;
        check_floor(options, device, next)?;
        system.flow_mut(flow)?.set_temperature(next)?;
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "exit temperature of {device} after {} iterations",
            options.max_iterations
        ),
    }
    .into())
}

/// Raise the floor's signal when `kelvin` is below it.
fn check_floor(options: &BalanceOptions, device: &str, kelvin: f64) -> PhysicsResult<()> {
    match options.floor {
        Some(floor) if kelvin < floor.kelvin => {
            tracing::debug!(
                device,
                kelvin,
                floor = floor.kelvin,
                signal = %floor.signal,
                "exit temperature below floor"
            );
            Err(PhysicsError::Infeasible(floor.signal))
        }
        _ => Ok(()),
    }
}
