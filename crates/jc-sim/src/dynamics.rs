//! Single-axis joint dynamics consuming controller command records.

use jc_core::{UpdateInfo, as_secs};
use jc_ecs::{
    AxisRecord, EntityComponentManager, JointForceCmd, JointTag, JointVelocity, JointVelocityCmd,
    System,
};
use tracing::debug;

use crate::error::{SimError, SimResult};

/// First-order joint model shared by every joint in the world.
///
/// Dynamics: `dv/dt = (force - damping * v) / inertia`.
///
/// A velocity command overrides the dynamics and sets the joint velocity
/// directly. A force command is integrated with explicit Euler.
#[derive(Clone, Debug, PartialEq)]
pub struct JointDynamics {
    /// Axis inertia, must be positive
    pub inertia: f64,
    /// Viscous damping coefficient, must be non-negative
    pub damping: f64,
}

impl JointDynamics {
    pub fn new(inertia: f64, damping: f64) -> SimResult<Self> {
        if !inertia.is_finite() || inertia <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "inertia must be positive",
            });
        }
        if !damping.is_finite() || damping < 0.0 {
            return Err(SimError::InvalidArg {
                what: "damping must be non-negative",
            });
        }
        Ok(Self { inertia, damping })
    }

    /// Acceleration for the given velocity and applied force.
    pub fn accel(&self, velocity: f64, force: f64) -> f64 {
        (force - self.damping * velocity) / self.inertia
    }

    /// Advance velocity by `dt` under `force`.
    pub fn advance(&self, velocity: f64, force: f64, dt: f64) -> f64 {
        velocity + self.accel(velocity, force) * dt
    }
}

impl System for JointDynamics {
    fn name(&self) -> &str {
        "joint_dynamics"
    }

    fn update(&mut self, info: &UpdateInfo, ecm: &mut EntityComponentManager) {
        if info.paused {
            return;
        }
        let dt = as_secs(info.dt);

        for joint in ecm.entities_with::<JointTag>() {
            let velocity = ecm
                .component::<JointVelocity>(joint)
                .and_then(|v| v.axis0())
                .unwrap_or(0.0);

            let velocity_cmd = ecm
                .component::<JointVelocityCmd>(joint)
                .and_then(|c| c.axis0());
            let force_cmd = ecm
                .component::<JointForceCmd>(joint)
                .and_then(|c| c.axis0());

            let next = if let Some(cmd) = velocity_cmd {
                cmd
            } else if let Some(force) = force_cmd {
                // Rewinds and zero-length ticks do not integrate.
                if dt > 0.0 {
                    self.advance(velocity, force, dt)
                } else {
                    velocity
                }
            } else {
                continue;
            };

            if let Err(e) = ecm.set_axis0::<JointVelocity>(joint, next) {
                debug!(%joint, "cannot write joint velocity: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jc_core::s;
    use jc_ecs::Model;

    fn joint_world() -> (EntityComponentManager, jc_core::Entity) {
        let mut ecm = EntityComponentManager::new();
        let model = Model::spawn(&mut ecm, "cart").unwrap();
        let joint = model.add_joint(&mut ecm, "wheel").unwrap();
        (ecm, joint)
    }

    #[test]
    fn invalid_parameters() {
        assert!(JointDynamics::new(0.0, 0.0).is_err());
        assert!(JointDynamics::new(-1.0, 0.0).is_err());
        assert!(JointDynamics::new(1.0, -0.1).is_err());
        assert!(JointDynamics::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn velocity_command_is_kinematic() {
        let (mut ecm, joint) = joint_world();
        ecm.create_component(joint, JointVelocityCmd::single(3.0)).unwrap();

        let mut dynamics = JointDynamics::new(1.0, 0.0).unwrap();
        dynamics.update(&UpdateInfo::with_dt(s(0.01)), &mut ecm);

        assert_eq!(
            ecm.component::<JointVelocity>(joint).unwrap().axis0(),
            Some(3.0)
        );
    }

    #[test]
    fn force_command_accelerates() {
        let (mut ecm, joint) = joint_world();
        ecm.create_component(joint, JointForceCmd::single(2.0)).unwrap();

        let mut dynamics = JointDynamics::new(4.0, 0.0).unwrap();
        dynamics.update(&UpdateInfo::with_dt(s(0.5)), &mut ecm);

        let v = ecm.component::<JointVelocity>(joint).unwrap().axis0().unwrap();
        assert!((v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn damping_settles_to_force_over_damping() {
        let dynamics = JointDynamics::new(1.0, 2.0).unwrap();
        let mut v = 0.0;
        for _ in 0..2_000 {
            v = dynamics.advance(v, 4.0, 0.01);
        }
        assert!((v - 2.0).abs() < 1e-6);
    }

    #[test]
    fn paused_and_rewind_ticks_hold_velocity() {
        let (mut ecm, joint) = joint_world();
        ecm.create_component(joint, JointForceCmd::single(2.0)).unwrap();
        ecm.create_component(joint, JointVelocity::single(1.0)).unwrap();
        let mut dynamics = JointDynamics::new(1.0, 0.0).unwrap();

        let paused = UpdateInfo {
            paused: true,
            ..UpdateInfo::with_dt(s(0.1))
        };
        dynamics.update(&paused, &mut ecm);
        dynamics.update(&UpdateInfo::with_dt(s(-0.1)), &mut ecm);

        assert_eq!(
            ecm.component::<JointVelocity>(joint).unwrap().axis0(),
            Some(1.0)
        );
    }

    #[test]
    fn joints_without_commands_are_untouched() {
        let (mut ecm, joint) = joint_world();
        let mut dynamics = JointDynamics::new(1.0, 0.0).unwrap();
        dynamics.update(&UpdateInfo::with_dt(s(0.1)), &mut ecm);
        assert!(!ecm.has_component::<JointVelocity>(joint));
    }
}
