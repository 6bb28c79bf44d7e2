//! In-memory entity/attribute store.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};

use jc_core::{Entity, EntityAllocator};

use crate::components::{AxisRecord, Component};
use crate::error::{EcsError, EcsResult};

type Records = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// Owns every entity and the records attached to it.
///
/// At most one record of each type exists per entity. Entities are iterated in
/// creation order so lookups by name are deterministic.
#[derive(Default)]
pub struct EntityComponentManager {
    entities: BTreeMap<Entity, Records>,
    alloc: EntityAllocator,
}

impl std::fmt::Debug for EntityComponentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityComponentManager")
            .field("entities", &self.entities.len())
            .finish()
    }
}

impl EntityComponentManager {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity with no records.
    pub fn create_entity(&mut self) -> EcsResult<Entity> {
        let entity = self.alloc.allocate()?;
        self.entities.insert(entity, Records::new());
        Ok(entity)
    }

    /// Remove an entity and all of its records.
    ///
    /// Returns `false` if the entity did not exist.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        self.entities.remove(&entity).is_some()
    }

    pub fn has_entity(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Borrow the record of type `C` on `entity`.
    pub fn component<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.entities
            .get(&entity)?
            .get(&TypeId::of::<C>())?
            .downcast_ref::<C>()
    }

    /// Mutably borrow the record of type `C` on `entity`.
    pub fn component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.entities
            .get_mut(&entity)?
            .get_mut(&TypeId::of::<C>())?
            .downcast_mut::<C>()
    }

    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.component::<C>(entity).is_some()
    }

    /// Attach `component` to `entity`, replacing any record of the same type.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityNotFound`] when the entity does not exist.
    pub fn create_component<C: Component>(
        &mut self,
        entity: Entity,
        component: C,
    ) -> EcsResult<()> {
        let records = self
            .entities
            .get_mut(&entity)
            .ok_or(EcsError::EntityNotFound { entity })?;
        records.insert(TypeId::of::<C>(), Box::new(component));
        Ok(())
    }

    /// Overwrite axis 0 of record `R`, creating a single-axis record if absent.
    pub fn set_axis0<R: AxisRecord>(&mut self, entity: Entity, value: f64) -> EcsResult<()> {
        match self.component_mut::<R>(entity) {
            Some(record) => {
                record.set_axis0(value);
                Ok(())
            }
            None => self.create_component(entity, R::single(value)),
        }
    }

    /// Detach the record of type `C`, returning it if present.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        let boxed = self
            .entities
            .get_mut(&entity)?
            .remove(&TypeId::of::<C>())?;
        boxed.downcast::<C>().ok().map(|b| *b)
    }

    /// All entities carrying a record of type `C`, in creation order.
    pub fn entities_with<C: Component>(&self) -> Vec<Entity> {
        let key = TypeId::of::<C>();
        self.entities
            .iter()
            .filter(|(_, records)| records.contains_key(&key))
            .map(|(entity, _)| *entity)
            .collect()
    }

    /// Number of entities carrying a record of type `C`.
    pub fn count<C: Component>(&self) -> usize {
        let key = TypeId::of::<C>();
        self.entities
            .values()
            .filter(|records| records.contains_key(&key))
            .count()
    }
}
