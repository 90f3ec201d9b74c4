//! sf-solver: mass and energy flow solvers for steelflow systems.
//!
//! Two levels:
//! - A local solver that finds the exit temperature closing one device's
//!   energy balance, optionally raising a signal below a temperature floor.
//! - An outer loop that runs a caller-supplied physics procedure over a whole
//!   system, and on an infeasibility signal adjusts the parameter owned by the
//!   signal and restarts from a clean copy.
//!
//! # Example
//!
//! ```
//! use sf_graph::{FlowRole, SystemBuilder};
//! use sf_solver::{PhysicsResult, Signal, SolverConfig, solve_mass_energy_flow};
//! use sf_thermo::EnergyFlow;
//!
//! let mut builder = SystemBuilder::new("plant");
//! builder.add_device("bof").unwrap();
//! builder
//!     .add_input("bof", EnergyFlow::zero("oxygen lance"), Some(FlowRole::Oxygen))
//!     .unwrap();
//! builder.set_parameter("o2 injection kg", 0.0);
//! let mut system = builder.build().unwrap();
//!
//! let mut physics = |s: &mut sf_graph::System| -> PhysicsResult<()> {
//!     if s.params().require("o2 injection kg")? < 0.2 {
//!         return Err(Signal::IncreaseInjectedO2.into());
//!     }
//!     Ok(())
//! };
//! let report = solve_mass_energy_flow(&mut system, &mut physics, &SolverConfig::default()).unwrap();
//! // Seeded at 0.1, then grown by 5% per retry until it reaches 0.2.
//! assert_eq!(report.adjustments[0].value, 0.1);
//! assert!(system.params().get("o2 injection kg").unwrap() >= 0.2);
//! ```

pub mod balance;
pub mod config;
pub mod converge;
pub mod error;
pub mod parallel;
pub mod physics;
pub mod signal;

pub use balance::{
    BalanceOptions, BalanceReport, TemperatureFloor, solve_exit_temperature,
    solve_exit_temperature_with,
};
pub use config::SolverConfig;
pub use converge::{AppliedAdjustment, SolveReport, solve_mass_energy_flow};
pub use error::{SolverError, SolverResult};
pub use parallel::solve_all;
pub use physics::{ComputePhysics, PhysicsError, PhysicsResult};
pub use signal::{Adjustment, AdjustmentTable, Signal};
