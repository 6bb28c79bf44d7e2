//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while building or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Store error: {0}")]
    Store(#[from] jc_ecs::EcsError),

    #[error("Transport error: {0}")]
    Transport(#[from] jc_transport::TransportError),

    #[error("Project error: {message}")]
    Project { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<jc_project::ValidationError> for SimError {
    fn from(e: jc_project::ValidationError) -> Self {
        SimError::Project {
            message: e.to_string(),
        }
    }
}
