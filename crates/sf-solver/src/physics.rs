//! The boundary between the solvers and caller-supplied physics procedures.

use sf_core::SfError;
use sf_graph::{GraphError, System};
use sf_thermo::ThermoError;

use crate::error::SolverError;
use crate::signal::Signal;

/// Outcome of a failed physics pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// The current parameters cannot produce a solution; the outer loop
    /// adjusts the parameter owned by the signal and retries.
    Infeasible(Signal),
    /// Anything else. Never retried.
    Fatal(SolverError),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::Infeasible(signal) => write!(f, "Infeasible: {signal}"),
            PhysicsError::Fatal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PhysicsError {}

impl From<Signal> for PhysicsError {
    fn from(signal: Signal) -> Self {
        PhysicsError::Infeasible(signal)
    }
}

impl From<SolverError> for PhysicsError {
    fn from(e: SolverError) -> Self {
        PhysicsError::Fatal(e)
    }
}

impl From<GraphError> for PhysicsError {
    fn from(e: GraphError) -> Self {
        PhysicsError::Fatal(e.into())
    }
}

impl From<ThermoError> for PhysicsError {
    fn from(e: ThermoError) -> Self {
        PhysicsError::Fatal(e.into())
    }
}

impl From<SfError> for PhysicsError {
    fn from(e: SfError) -> Self {
        PhysicsError::Fatal(e.into())
    }
}

/// One full forward pass over a system: populate every flow and close every
/// device balance, or report why that is not possible.
pub trait ComputePhysics {
    fn compute(&mut self, system: &mut System) -> PhysicsResult<()>;
}

impl<F> ComputePhysics for F
where
    F: FnMut(&mut System) -> PhysicsResult<()>,
{
    fn compute(&mut self, system: &mut System) -> PhysicsResult<()> {
        self(system)
    }
}
