//! sf-thermo: thermodynamic properties of process flows for steelflow.
//!
//! Provides:
//! - Heat-capacity correlations (constant, NIST Shomate, tabulated) over temperature segments
//! - ThermoData: contiguous segments plus latent heats, with enthalpy integration
//! - Species and Mixture quantities, including enthalpy-conserving merges
//! - EnergyFlow and the `Flow` enum shared by every device slot
//! - A catalogue of species used in iron and steelmaking
//! - Reaction enthalpy from formation enthalpies
//!
//! # Example
//!
//! ```
//! use sf_thermo::catalog;
//!
//! let water = catalog::species("H2O").unwrap().with_moles(1.0).unwrap().at(298.15).unwrap();
//! let to_boiling = water.heat_energy(373.15).unwrap();
//! assert!((to_boiling - 75.36 * 75.0).abs() < 1e-6);
//! ```

pub mod catalog;
pub mod correlation;
pub mod energy;
pub mod error;
pub mod flow;
pub mod mixture;
pub mod reaction;
pub mod species;
pub mod thermo_data;

pub use correlation::{Correlation, LatentHeat, Segment};
pub use energy::EnergyFlow;
pub use error::{ThermoError, ThermoResult};
pub use flow::Flow;
pub use mixture::Mixture;
pub use reaction::reaction_enthalpy;
pub use species::{HeatCapacityBasis, Species};
pub use thermo_data::ThermoData;
