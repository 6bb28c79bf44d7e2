//! Entity/attribute store for jointctl.
//!
//! A small keyed-by-entity-and-type record store with create/get/mutate
//! semantics, plus the `System` hooks a scheduler drives once per tick.
//!
//! - `EntityComponentManager` owns all records
//! - `components` holds the record types shared by controllers and physics
//! - `Model` scopes lookups to the joints of one model entity

pub mod components;
pub mod error;
pub mod manager;
pub mod model;
pub mod system;

pub use components::{
    AxisRecord, Component, JointForceCmd, JointTag, JointVelocity, JointVelocityCmd, ModelTag, Name,
    ParentEntity,
};
pub use error::{EcsError, EcsResult};
pub use manager::EntityComponentManager;
pub use model::Model;
pub use system::System;
