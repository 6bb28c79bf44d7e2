//! Error types for transport operations.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Topic name rejected by validation.
    #[error("Invalid topic name: {topic:?}")]
    InvalidTopic { topic: String },
}
