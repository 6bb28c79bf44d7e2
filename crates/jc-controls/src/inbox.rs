//! Set-point hand-off between the transport and the control loop.

use std::sync::Arc;

use parking_lot::Mutex;

/// Single-value mailbox holding the latest commanded set-point.
///
/// Clones share the same cell. Both `set` and `get` hold the lock only for one
/// `f64` copy; the last completed `set` wins.
#[derive(Debug, Clone)]
pub struct CommandInbox {
    cell: Arc<Mutex<f64>>,
}

impl CommandInbox {
    pub fn new(initial: f64) -> Self {
        Self {
            cell: Arc::new(Mutex::new(initial)),
        }
    }

    /// Overwrite the set-point. Callable from any thread.
    pub fn set(&self, value: f64) {
        *self.cell.lock() = value;
    }

    /// Copy of the latest set-point.
    pub fn get(&self) -> f64 {
        *self.cell.lock()
    }
}

impl Default for CommandInbox {
    fn default() -> Self {
        Self::new(0.0)
    }
}
