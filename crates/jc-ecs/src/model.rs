//! Model-scoped view over the store.

use jc_core::Entity;

use crate::components::{JointTag, ModelTag, Name, ParentEntity};
use crate::error::EcsResult;
use crate::manager::EntityComponentManager;

/// Thin handle onto a model entity.
///
/// Holds only the id; every query goes through the store passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Model {
    entity: Entity,
}

impl Model {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    /// Create a named model entity.
    pub fn spawn(ecm: &mut EntityComponentManager, name: impl Into<String>) -> EcsResult<Self> {
        let entity = ecm.create_entity()?;
        ecm.create_component(entity, ModelTag)?;
        ecm.create_component(entity, Name(name.into()))?;
        Ok(Self { entity })
    }

    /// Create a named joint owned by this model.
    pub fn add_joint(
        &self,
        ecm: &mut EntityComponentManager,
        name: impl Into<String>,
    ) -> EcsResult<Entity> {
        let joint = ecm.create_entity()?;
        ecm.create_component(joint, JointTag)?;
        ecm.create_component(joint, Name(name.into()))?;
        ecm.create_component(joint, ParentEntity(self.entity))?;
        Ok(joint)
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// True if the entity exists and is tagged as a model.
    pub fn valid(&self, ecm: &EntityComponentManager) -> bool {
        ecm.has_component::<ModelTag>(self.entity)
    }

    pub fn name<'a>(&self, ecm: &'a EntityComponentManager) -> Option<&'a str> {
        ecm.component::<Name>(self.entity).map(|n| n.0.as_str())
    }

    /// All joints owned by this model, in creation order.
    pub fn joints(&self, ecm: &EntityComponentManager) -> Vec<Entity> {
        ecm.entities_with::<JointTag>()
            .into_iter()
            .filter(|&joint| {
                ecm.component::<ParentEntity>(joint)
                    .is_some_and(|p| p.0 == self.entity)
            })
            .collect()
    }

    /// Find a joint of this model by name.
    pub fn joint_by_name(&self, ecm: &EntityComponentManager, name: &str) -> Option<Entity> {
        self.joints(ecm)
            .into_iter()
            .find(|&joint| ecm.component::<Name>(joint).is_some_and(|n| n.0 == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_lookup_is_scoped_to_model() {
        let mut ecm = EntityComponentManager::new();
        let cart = Model::spawn(&mut ecm, "cart").unwrap();
        let arm = Model::spawn(&mut ecm, "arm").unwrap();
        let cart_wheel = cart.add_joint(&mut ecm, "wheel").unwrap();
        let arm_wheel = arm.add_joint(&mut ecm, "wheel").unwrap();

        assert_eq!(cart.joint_by_name(&ecm, "wheel"), Some(cart_wheel));
        assert_eq!(arm.joint_by_name(&ecm, "wheel"), Some(arm_wheel));
        assert_eq!(cart.joint_by_name(&ecm, "elbow"), None);
    }

    #[test]
    fn validity_and_name() {
        let mut ecm = EntityComponentManager::new();
        let cart = Model::spawn(&mut ecm, "cart").unwrap();
        let joint = cart.add_joint(&mut ecm, "wheel").unwrap();

        assert!(cart.valid(&ecm));
        assert_eq!(cart.name(&ecm), Some("cart"));
        assert!(!Model::new(joint).valid(&ecm));
    }
}
