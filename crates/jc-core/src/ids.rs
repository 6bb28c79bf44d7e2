use core::fmt;
use core::num::NonZeroU32;

use crate::error::{CoreError, CoreResult};

/// Compact, stable identifier for an entity in the attribute store.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Entity>` to be pointer-optimized, so "not yet
///   resolved" costs nothing extra
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity(NonZeroU32);

impl Entity {
    /// Create an entity from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> CoreResult<Self> {
        index
            .checked_add(1)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(CoreError::IdExhausted { what: "entity" })
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.index())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Sequential allocator handing out fresh entity ids.
#[derive(Debug, Default, Clone)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id. Ids are never reused.
    pub fn allocate(&mut self) -> CoreResult<Entity> {
        let entity = Entity::from_index(self.next)?;
        self.next += 1;
        Ok(entity)
    }
}
