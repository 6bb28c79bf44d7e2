//! Fixed-step simulation host for joint controllers.
//!
//! Provides:
//! - Tick scheduler driving `System` hooks with signed elapsed time
//! - Single-axis joint dynamics consuming velocity and force commands
//! - World builder turning a world document into a runnable simulation

pub mod dynamics;
pub mod error;
pub mod sim;
pub mod world;

pub use dynamics::JointDynamics;
pub use error::{SimError, SimResult};
pub use sim::{JointSample, RunRecord, ScheduledCommand, SimOptions, Simulation};
pub use world::build;
