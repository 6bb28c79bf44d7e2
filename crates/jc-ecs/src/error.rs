//! Error types for store operations.

use jc_core::{CoreError, Entity};
use thiserror::Error;

/// Result type for store operations.
pub type EcsResult<T> = Result<T, EcsError>;

/// Errors that can occur while creating or mutating records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EcsError {
    /// The entity does not exist (never created, or removed).
    #[error("Entity not found: {entity}")]
    EntityNotFound { entity: Entity },

    #[error(transparent)]
    Core(#[from] CoreError),
}
