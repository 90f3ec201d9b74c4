//! sf-core: stable foundation for steelflow.
//!
//! Contains:
//! - units (uom-backed temperature and energy conversions, reference temperatures)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact handles for devices and flows)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SfError, SfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
