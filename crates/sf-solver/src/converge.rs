//! Outer retry loop: run the physics on a scratch copy until no signal is
//! raised, then replay it on the caller's system and check the balances.

use serde::Serialize;
use sf_graph::{Parameters, System};

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::physics::{ComputePhysics, PhysicsError};
use crate::signal::Signal;

/// A parameter change made in response to a signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedAdjustment {
    /// 1-based pass that raised the signal
    pub attempt: usize,
    pub signal: Signal,
    pub parameter: String,
    /// Value used by the next pass
    pub value: f64,
}

/// Summary of a converged solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    /// Number of trial passes, including the successful one
    pub attempts: usize,
    pub adjustments: Vec<AppliedAdjustment>,
    /// Parameters the system was solved with
    pub params: Parameters,
}

impl SolveReport {
    pub fn retries(&self) -> usize {
        self.adjustments.len()
    }
}

/// Solve `system` with `physics`, retrying with adjusted parameters whenever a
/// pass reports infeasibility.
///
/// Trial passes run on a clone so a failed pass never leaves partial results
/// in `system`. The successful parameters are then applied to `system`, the
/// physics runs once more on it, and every device balance is checked against
/// `config.balance_tolerance`.
pub fn solve_mass_energy_flow<P>(
    system: &mut System,
    physics: &mut P,
    config: &SolverConfig,
) -> SolverResult<SolveReport>
where
    P: ComputePhysics + ?Sized,
{
    config.validate()?;
    let name = system.name().to_string();
    let mut params = system.params().clone();
    let mut adjustments = Vec::new();

    let mut attempts = 0;
    loop {
        if attempts == config.max_attempts {
            tracing::warn!(system = %name, attempts, "giving up after maximum attempts");
            return Err(SolverError::MaxAttemptsExceeded {
                system: name,
                attempts,
            });
        }
        attempts += 1;

        let mut trial = system.clone();
        trial.set_params(params.clone());
        match physics.compute(&mut trial) {
            Ok(()) => break,
            Err(PhysicsError::Infeasible(signal)) => {
                let adjustment = config.adjustments.get(signal)?;
                let value = adjustment.apply(&mut params)?;
                tracing::debug!(
                    system = %name,
                    attempt = attempts,
                    %signal,
                    parameter = %adjustment.parameter,
                    value,
                    "pass infeasible, adjusting"
                );
                adjustments.push(AppliedAdjustment {
                    attempt: attempts,
                    signal,
                    parameter: adjustment.parameter.clone(),
                    value,
                });
            }
            Err(PhysicsError::Fatal(e)) => return Err(e),
        }
    }

    system.set_params(params.clone());
    match physics.compute(system) {
        Ok(()) => {}
        Err(PhysicsError::Infeasible(signal)) => {
            tracing::warn!(system = %name, %signal, "final pass infeasible");
            return Err(SolverError::FinalPassInfeasible {
                system: name,
                signal,
            });
        }
        Err(PhysicsError::Fatal(e)) => return Err(e),
    }

    system
        .validate_balances(config.balance_tolerance)
        .map_err(|source| SolverError::BalanceViolation {
            system: name.clone(),
            source,
        })?;

    tracing::info!(
        system = %name,
        attempts,
        retries = adjustments.len(),
        "mass and energy flow converged"
    );
    Ok(SolveReport {
        attempts,
        adjustments,
        params,
    })
}
