//! Record types stored per entity.

use std::any::Any;

use jc_core::Entity;

/// Marker for types that can be attached to an entity.
pub trait Component: Any + Send + Sync + 'static {}

/// Human-readable entity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

/// Tags an entity as a model (a container of joints).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelTag;

/// Tags an entity as a joint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JointTag;

/// Owning entity (joint → model).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentEntity(pub Entity);

impl Component for Name {}
impl Component for ModelTag {}
impl Component for JointTag {}
impl Component for ParentEntity {}

/// Joint record holding one value per degree of freedom.
pub trait AxisRecord: Component {
    /// Single-axis record.
    fn single(value: f64) -> Self;

    fn axes(&self) -> &[f64];

    fn axes_mut(&mut self) -> &mut Vec<f64>;

    /// Value of the first axis, if any.
    fn axis0(&self) -> Option<f64> {
        self.axes().first().copied()
    }

    /// Overwrite the first axis, growing an empty record.
    fn set_axis0(&mut self, value: f64) {
        let axes = self.axes_mut();
        match axes.first_mut() {
            Some(slot) => *slot = value,
            None => axes.push(value),
        }
    }
}

macro_rules! axis_component {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name(pub Vec<f64>);

        impl Component for $name {}

        impl AxisRecord for $name {
            fn single(value: f64) -> Self {
                Self(vec![value])
            }

            fn axes(&self) -> &[f64] {
                &self.0
            }

            fn axes_mut(&mut self) -> &mut Vec<f64> {
                &mut self.0
            }
        }
    };
}

axis_component!(
    /// Observed joint velocity, written by the physics stage.
    JointVelocity
);

axis_component!(
    /// Commanded joint velocity, consumed kinematically by the physics stage.
    JointVelocityCmd
);

axis_component!(
    /// Commanded joint force (or torque), consumed dynamically by the physics stage.
    JointForceCmd
);
