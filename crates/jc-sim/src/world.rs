//! Build a runnable simulation from a world document.

use jc_controls::JointController;
use jc_ecs::{JointVelocity, Model};
use jc_project::{PluginKind, World, validate_world};
use tracing::info;

use crate::dynamics::JointDynamics;
use crate::error::SimResult;
use crate::sim::{ScheduledCommand, Simulation};

/// Spawn models and joints, attach controllers and physics, and return the
/// scripted set-points.
///
/// Controllers run before physics within a tick: they write commands in
/// `pre_update` and `JointDynamics` consumes them in `update`.
pub fn build(world: &World) -> SimResult<(Simulation, Vec<ScheduledCommand>)> {
    validate_world(world)?;

    let mut sim = Simulation::new();
    let mut controllers = Vec::new();

    for model_def in &world.models {
        let model = Model::spawn(sim.ecm_mut(), model_def.name.as_str())?;
        for joint_def in &model_def.joints {
            let joint = model.add_joint(sim.ecm_mut(), joint_def.name.as_str())?;
            if let Some(v) = joint_def.initial_velocity {
                sim.ecm_mut()
                    .create_component(joint, JointVelocity(vec![v]))?;
            }
        }

        for plugin in &model_def.plugins {
            match plugin.kind {
                PluginKind::JointController => {
                    controllers.push(JointController::configure(
                        model.entity(),
                        &plugin.params,
                        sim.ecm(),
                        sim.node(),
                    ));
                }
            }
        }
    }

    let n_controllers = controllers.len();
    for controller in controllers {
        sim.add_system(controller);
    }
    sim.add_system(JointDynamics::new(
        world.physics.inertia,
        world.physics.damping,
    )?);

    info!(
        world = %world.name,
        models = world.models.len(),
        controllers = n_controllers,
        "world built"
    );

    let schedule = world
        .commands
        .iter()
        .map(|c| ScheduledCommand {
            time: c.time,
            topic: c.topic.clone(),
            value: c.value,
        })
        .collect();

    Ok((sim, schedule))
}
