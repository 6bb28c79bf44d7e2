//! Error types shared by the foundation crate.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Id space exhausted: {what}")]
    IdExhausted { what: &'static str },
}
