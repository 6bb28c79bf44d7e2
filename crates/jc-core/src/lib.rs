//! jc-core: stable foundation for jointctl.
//!
//! Contains:
//! - units (uom SI time + constructors)
//! - numeric (Real + ordered clamp)
//! - ids (compact entity IDs for the attribute store)
//! - update (per-tick scheduler information)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;
pub mod update;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
pub use update::UpdateInfo;
