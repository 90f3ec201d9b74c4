//! sf-graph: device/flow network layer for steelflow.
//!
//! Provides:
//! - Devices with named, optionally role-tagged input and output slots
//! - A flow arena owning every flow, addressed by `FlowId` handles
//! - Incremental system builder with boundary devices and validation
//! - Named parameter store read by physics procedures
//! - Mass and energy balance queries per device and per system
//!
//! # Example
//!
//! ```
//! use sf_graph::{FlowRole, SystemBuilder};
//! use sf_thermo::EnergyFlow;
//!
//! let mut builder = SystemBuilder::new("plant");
//! builder.add_device("heater").unwrap();
//! builder
//!     .add_input("heater", EnergyFlow::new("electricity", 10.0), Some(FlowRole::Electricity))
//!     .unwrap();
//! builder
//!     .add_output("heater", EnergyFlow::new("losses", 10.0), Some(FlowRole::Losses))
//!     .unwrap();
//! let system = builder.build().unwrap();
//!
//! assert_eq!(system.devices().len(), 3);
//! assert!(system.energy_balance("heater").unwrap().abs() < 1e-12);
//! ```

pub mod arena;
pub mod builder;
pub mod device;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod params;
pub mod system;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use arena::FlowArena;
pub use builder::SystemBuilder;
pub use device::{Device, DeviceKind, Direction, FlowRole, Slot};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, INPUT_SUFFIX, Network, OUTPUT_SUFFIX};
pub use indexing::NameIndex;
pub use params::Parameters;
pub use system::{DeviceBalance, System};
