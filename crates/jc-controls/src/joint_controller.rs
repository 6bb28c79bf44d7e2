//! Joint velocity controller.
//!
//! Drives one joint of a model towards a commanded velocity. The set-point
//! arrives asynchronously over the transport; once per tick the controller
//! either writes it straight into a [`JointVelocityCmd`] record or feeds the
//! velocity error through a [`Pid`] and writes a [`JointForceCmd`] record.
//!
//! Configuration faults leave the controller disabled for its whole lifetime.
//! Runtime faults (joint not found yet, record creation failing) skip the tick
//! and are retried on the next one.

use jc_core::{Entity, UpdateInfo, as_secs};
use jc_ecs::{
    AxisRecord, EcsResult, EntityComponentManager, JointForceCmd, JointVelocity,
    JointVelocityCmd, Model, System,
};
use jc_transport::Node;
use tracing::{debug, error, info, trace, warn};

use crate::config::{CommandMode, JointControllerConfig, keys};
use crate::error::{ControlError, ControlResult};
use crate::inbox::CommandInbox;
use crate::params::Params;
use crate::pid::Pid;
use crate::resolver::ActuatorResolver;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Configuration failed; the controller never acts.
    Disabled,
    /// The joint does not exist (yet).
    Unresolved,
    /// Simulation paused; nothing touched.
    Paused,
    /// A record could not be created or read; retried next tick.
    StoreFault,
    /// Velocity command written.
    Velocity(f64),
    /// Force command written.
    Force(f64),
}

enum Actuation {
    Velocity,
    Force(Pid),
}

struct Active {
    model: Model,
    resolver: ActuatorResolver,
    inbox: CommandInbox,
    actuation: Actuation,
    topic: String,
    subscribed: bool,
}

/// Per-model joint velocity controller.
pub struct JointController {
    active: Option<Active>,
}

impl std::fmt::Debug for JointController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.active {
            None => f.write_str("JointController(disabled)"),
            Some(active) => f
                .debug_struct("JointController")
                .field("joint", &active.resolver.name())
                .field("handle", &active.resolver.handle())
                .field("topic", &active.topic)
                .finish(),
        }
    }
}

impl JointController {
    /// Configure from an option map, logging and disabling on failure.
    pub fn configure(
        model_entity: Entity,
        params: &Params,
        ecm: &EntityComponentManager,
        node: &Node,
    ) -> Self {
        match Self::try_configure(model_entity, params, ecm, node) {
            Ok(controller) => controller,
            Err(e) => {
                error!(%model_entity, "JointController failed to initialize: {e}");
                Self::disabled()
            }
        }
    }

    /// Configure from an option map.
    pub fn try_configure(
        model_entity: Entity,
        params: &Params,
        ecm: &EntityComponentManager,
        node: &Node,
    ) -> ControlResult<Self> {
        let config = JointControllerConfig::from_params(params)?;
        if params.contains(keys::INITIAL_VELOCITY) {
            info!("Joint velocity initialized to [{}]", config.initial_velocity);
        }
        Self::new(Model::new(model_entity), config, ecm, node)
    }

    /// Build a controller for `model` from a ready configuration.
    ///
    /// # Errors
    ///
    /// - [`ControlError::NotAModel`] if `model` is not a model entity
    /// - [`ControlError::MissingParam`] if the joint name is empty
    pub fn new(
        model: Model,
        config: JointControllerConfig,
        ecm: &EntityComponentManager,
        node: &Node,
    ) -> ControlResult<Self> {
        if !model.valid(ecm) {
            return Err(ControlError::NotAModel {
                entity: model.entity(),
            });
        }
        if config.joint_name.is_empty() {
            return Err(ControlError::MissingParam {
                key: keys::JOINT_NAME,
            });
        }

        let actuation = match config.mode {
            CommandMode::Force => {
                let pid = &config.pid;
                debug!(
                    p_gain = pid.p_gain,
                    i_gain = pid.i_gain,
                    d_gain = pid.d_gain,
                    i_max = pid.i_max,
                    i_min = pid.i_min,
                    cmd_max = pid.cmd_max,
                    cmd_min = pid.cmd_min,
                    cmd_offset = pid.cmd_offset,
                    "[JointController] Force mode"
                );
                Actuation::Force(Pid::new(config.pid))
            }
            CommandMode::Velocity => {
                debug!("[JointController] Velocity mode");
                Actuation::Velocity
            }
        };

        let inbox = CommandInbox::new(config.initial_velocity);
        let topic = config.topic_for(model.name(ecm).unwrap_or_default());
        let sink = inbox.clone();
        let (topic, subscribed) = match node.subscribe(&topic, move |msg| sink.set(msg.data)) {
            Ok(rooted) => {
                info!("JointController subscribing to Double messages on [{rooted}]");
                (rooted, true)
            }
            Err(e) => {
                error!("JointController failed to subscribe to [{topic}]: {e}");
                (topic, false)
            }
        };

        Ok(Self {
            active: Some(Active {
                model,
                resolver: ActuatorResolver::new(config.joint_name),
                inbox,
                actuation,
                topic,
                subscribed,
            }),
        })
    }

    /// A controller that never acts.
    pub fn disabled() -> Self {
        Self { active: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Set-point mailbox shared with the transport callback.
    pub fn inbox(&self) -> Option<&CommandInbox> {
        self.active.as_ref().map(|a| &a.inbox)
    }

    /// Subscribed topic, or the rejected name if subscribing failed.
    pub fn topic(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.topic.as_str())
    }

    /// True if the transport accepted the subscription.
    pub fn is_subscribed(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.subscribed)
    }

    /// Resolved joint, once found.
    pub fn joint(&self) -> Option<Entity> {
        self.active.as_ref().and_then(|a| a.resolver.handle())
    }

    /// Velocity regulator, in force mode.
    pub fn pid(&self) -> Option<&Pid> {
        match &self.active.as_ref()?.actuation {
            Actuation::Force(pid) => Some(pid),
            Actuation::Velocity => None,
        }
    }

    pub fn mode(&self) -> Option<CommandMode> {
        self.active.as_ref().map(|a| match a.actuation {
            Actuation::Velocity => CommandMode::Velocity,
            Actuation::Force(_) => CommandMode::Force,
        })
    }

    /// Run one control tick.
    pub fn step(&mut self, info: &UpdateInfo, ecm: &mut EntityComponentManager) -> StepOutcome {
        match self.active.as_mut() {
            Some(active) => active.step(info, ecm),
            None => StepOutcome::Disabled,
        }
    }
}

impl Active {
    fn step(&mut self, info: &UpdateInfo, ecm: &mut EntityComponentManager) -> StepOutcome {
        // Rewinds reach the PID unchanged; its state is never reset.
        if info.is_rewind() {
            warn!(
                "Detected jump back in time [{}s]. System may not work properly.",
                as_secs(info.dt)
            );
        }

        let model = self.model;
        let Some(joint) = self
            .resolver
            .resolve(|name| model.joint_by_name(ecm, name))
        else {
            trace!(joint = self.resolver.name(), "joint not found");
            return StepOutcome::Unresolved;
        };

        if info.paused {
            return StepOutcome::Paused;
        }

        if let Err(e) = ensure_velocity_record(ecm, joint) {
            debug!(%joint, "cannot create joint velocity record: {e}");
            return StepOutcome::StoreFault;
        }

        let target = self.inbox.get();

        match &mut self.actuation {
            Actuation::Force(pid) => {
                let Some(observed) = ecm.component::<JointVelocity>(joint).and_then(|v| v.axis0())
                else {
                    debug!(%joint, "joint velocity record has no axes");
                    return StepOutcome::StoreFault;
                };
                let force = pid.update(observed - target, info.dt);
                write_command::<JointForceCmd>(ecm, joint, force, StepOutcome::Force(force))
            }
            Actuation::Velocity => {
                write_command::<JointVelocityCmd>(ecm, joint, target, StepOutcome::Velocity(target))
            }
        }
    }
}

impl System for JointController {
    fn name(&self) -> &str {
        "joint_controller"
    }

    fn pre_update(&mut self, info: &UpdateInfo, ecm: &mut EntityComponentManager) {
        let outcome = self.step(info, ecm);
        trace!(?outcome, "joint controller tick");
    }
}

fn ensure_velocity_record(ecm: &mut EntityComponentManager, joint: Entity) -> EcsResult<()> {
    if ecm.has_component::<JointVelocity>(joint) {
        return Ok(());
    }
    ecm.create_component(joint, JointVelocity::single(0.0))
}

fn write_command<R: AxisRecord>(
    ecm: &mut EntityComponentManager,
    joint: Entity,
    value: f64,
    outcome: StepOutcome,
) -> StepOutcome {
    match ecm.set_axis0::<R>(joint, value) {
        Ok(()) => outcome,
        Err(e) => {
            debug!(%joint, "cannot write joint command: {e}");
            StepOutcome::StoreFault
        }
    }
}
