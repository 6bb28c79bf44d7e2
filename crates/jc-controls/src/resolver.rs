//! Memoized lookup of the controlled joint.

use jc_core::Entity;
use tracing::debug;

/// Resolves an actuator name to an entity once and remembers it.
///
/// A failed lookup is not cached, so the next call retries. After a success
/// the lookup is never invoked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorResolver {
    name: String,
    handle: Option<Entity>,
}

impl ActuatorResolver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached handle, if resolution already succeeded.
    pub fn handle(&self) -> Option<Entity> {
        self.handle
    }

    pub fn is_resolved(&self) -> bool {
        self.handle.is_some()
    }

    /// Return the cached handle, or run `lookup` with the actuator name.
    pub fn resolve<F>(&mut self, lookup: F) -> Option<Entity>
    where
        F: FnOnce(&str) -> Option<Entity>,
    {
        if self.handle.is_none() {
            self.handle = lookup(&self.name);
            if let Some(entity) = self.handle {
                debug!(joint = %self.name, %entity, "actuator resolved");
            }
        }
        self.handle
    }
}
