//! Message payloads.

use serde::{Deserialize, Serialize};

/// Single-field numeric payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Double {
    pub data: f64,
}

impl Double {
    pub fn new(data: f64) -> Self {
        Self { data }
    }
}

impl From<f64> for Double {
    fn from(data: f64) -> Self {
        Self { data }
    }
}
