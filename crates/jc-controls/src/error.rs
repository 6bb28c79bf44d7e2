//! Error types for controller configuration.

use jc_core::Entity;
use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while configuring a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// A required option is absent or empty.
    #[error("Missing required parameter: {key}")]
    MissingParam { key: &'static str },

    /// An option is present but cannot be read as the expected type.
    #[error("Invalid parameter {key}: expected {expected}, found {found}")]
    InvalidParam {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// The owning entity is not a model.
    #[error("Entity {entity} is not a model")]
    NotAModel { entity: Entity },
}
