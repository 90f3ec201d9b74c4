//! Graph-specific error types.

use sf_core::{Id, SfError};
use sf_thermo::ThermoError;
use thiserror::Error;

use crate::device::{Direction, FlowRole};

pub type GraphResult<T> = Result<T, GraphError>;

/// System construction, lookup and balance errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Device with name {name} already exists")]
    DuplicateDevice { name: String },

    #[error("Device {name} does not exist")]
    UnknownDevice { name: String },

    /// A flow edge without a source or a destination.
    #[error("Cannot add flow {flow} without a source or destination")]
    DanglingFlow { flow: String },

    #[error("{flow} flow between devices {from} and {to} already exists")]
    DuplicateFlow { from: String, to: String, flow: String },

    #[error("{flow} flow between devices {from} and {to} does not exist")]
    FlowNotFound { from: String, to: String, flow: String },

    /// Two flows with the same name on one side of a device.
    #[error("Device {device} already has an {direction} named {slot}")]
    DuplicateSlot {
        device: String,
        direction: Direction,
        slot: String,
    },

    #[error("Device {device} already has an {direction} with role {role}")]
    DuplicateRole {
        device: String,
        direction: Direction,
        role: FlowRole,
    },

    #[error("Device {device} has no {direction} named {slot}")]
    SlotNotFound {
        device: String,
        direction: Direction,
        slot: String,
    },

    #[error("Device {device} has no {direction} with role {role}")]
    RoleNotFound {
        device: String,
        direction: Direction,
        role: FlowRole,
    },

    #[error("Device {device} has no {direction} whose name contains '{pattern}'")]
    NoMatch {
        device: String,
        direction: Direction,
        pattern: String,
    },

    #[error("Device {device} has {count} {direction}s whose name contains '{pattern}'")]
    AmbiguousMatch {
        device: String,
        direction: Direction,
        pattern: String,
        count: usize,
    },

    /// A join device must have exactly one output.
    #[error("Join device {device} has {outputs} outputs (expected 1)")]
    InvalidJoin { device: String, outputs: usize },

    #[error("{what} {id} not found")]
    IdNotFound { what: &'static str, id: Id },

    #[error("Parameter {name} is not set")]
    MissingParameter { name: String },

    /// A device balance exceeds the tolerance.
    #[error("{quantity} balance of device {device} is {value} (tolerance {tolerance})")]
    Unbalanced {
        device: String,
        quantity: &'static str,
        value: f64,
        tolerance: f64,
    },

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Core(#[from] SfError),
}
