//! Closed-loop joint velocity control for jointctl.
//!
//! A controller receives a target velocity over the transport at any time and,
//! once per simulation tick, turns it into a command record for the physics
//! stage.
//!
//! # Architecture
//!
//! - [`CommandInbox`]: lock-protected slot for the latest set-point
//! - [`ActuatorResolver`]: memoized lookup of the controlled joint
//! - [`Pid`]: clamped PID regulator used in force mode
//! - [`JointControllerConfig`]: options parsed once at startup
//! - [`JointController`]: the per-tick orchestrator
//!
//! Exactly one command record kind is written per controller, fixed by its
//! configured [`CommandMode`].

pub mod config;
pub mod error;
pub mod inbox;
pub mod joint_controller;
pub mod params;
pub mod pid;
pub mod resolver;

pub use config::{CommandMode, JointControllerConfig, default_topic};
pub use error::{ControlError, ControlResult};
pub use inbox::CommandInbox;
pub use joint_controller::{JointController, StepOutcome};
pub use params::{ParamValue, Params};
pub use pid::{Pid, PidConfig, PidState};
pub use resolver::ActuatorResolver;
