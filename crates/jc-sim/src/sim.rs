//! Fixed-step scheduler and result recording.

use jc_core::{Time, UpdateInfo, as_secs, s};
use jc_ecs::{
    AxisRecord, EntityComponentManager, JointForceCmd, JointTag, JointVelocity, JointVelocityCmd,
    Name, ParentEntity, System,
};
use jc_transport::{Double, Node};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
        }
    }
}

impl SimOptions {
    fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Set-point publication scheduled at a simulation time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledCommand {
    /// Publication time (seconds)
    pub time: f64,
    pub topic: String,
    pub value: f64,
}

/// State of one joint at one recorded instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    /// Simulation time (seconds)
    pub t: f64,
    /// `model/joint`
    pub joint: String,
    pub velocity: Option<f64>,
    pub velocity_cmd: Option<f64>,
    pub force_cmd: Option<f64>,
}

/// Record of simulation results.
#[derive(Clone, Debug, Default)]
pub struct RunRecord {
    pub samples: Vec<JointSample>,
}

impl RunRecord {
    /// Samples of one joint, in time order.
    pub fn joint(&self, label: &str) -> impl Iterator<Item = &JointSample> {
        self.samples.iter().filter(move |s| s.joint == label)
    }

    /// Last sample of one joint.
    pub fn last(&self, label: &str) -> Option<&JointSample> {
        self.joint(label).last()
    }
}

/// Tick scheduler owning the store, the bus and the registered systems.
///
/// Each `step` calls `pre_update` on every system, then `update`, then
/// `post_update`, in registration order.
pub struct Simulation {
    ecm: EntityComponentManager,
    node: Node,
    systems: Vec<Box<dyn System>>,
    sim_time: Time,
    iterations: u64,
    paused: bool,
    seek_to: Option<Time>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_node(Node::new())
    }

    /// Scheduler sharing an existing bus.
    pub fn with_node(node: Node) -> Self {
        Self {
            ecm: EntityComponentManager::new(),
            node,
            systems: Vec::new(),
            sim_time: s(0.0),
            iterations: 0,
            paused: false,
            seek_to: None,
        }
    }

    pub fn ecm(&self) -> &EntityComponentManager {
        &self.ecm
    }

    pub fn ecm_mut(&mut self) -> &mut EntityComponentManager {
        &mut self.ecm
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        debug!(system = system.name(), "system added");
        self.systems.push(Box::new(system));
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn sim_time(&self) -> Time {
        self.sim_time
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Paused ticks advance neither time nor the iteration count.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Jump to `time` on the next tick. A target in the past yields a
    /// negative `dt`.
    pub fn seek(&mut self, time: Time) {
        self.seek_to = Some(time);
    }

    /// Run one tick of length `dt` and return the info handed to systems.
    pub fn step(&mut self, dt: Time) -> UpdateInfo {
        let (dt, sim_time) = match self.seek_to.take() {
            Some(target) => (target - self.sim_time, target),
            None if self.paused => (s(0.0), self.sim_time),
            None => (dt, self.sim_time + dt),
        };
        if !self.paused {
            self.iterations += 1;
        }
        self.sim_time = sim_time;

        let info = UpdateInfo {
            sim_time,
            dt,
            iterations: self.iterations,
            paused: self.paused,
        };

        for system in &mut self.systems {
            system.pre_update(&info, &mut self.ecm);
        }
        for system in &mut self.systems {
            system.update(&info, &mut self.ecm);
        }
        for system in &mut self.systems {
            system.post_update(&info, &self.ecm);
        }
        info
    }

    /// Run until `t_end`, publishing scheduled set-points before the tick
    /// that first reaches their time.
    pub fn run(
        &mut self,
        opts: &SimOptions,
        schedule: &[ScheduledCommand],
    ) -> SimResult<RunRecord> {
        opts.validate()?;

        let mut pending: Vec<&ScheduledCommand> = schedule.iter().collect();
        pending.sort_by(|a, b| a.time.total_cmp(&b.time));
        let mut pending = pending.into_iter().peekable();

        let mut record = RunRecord::default();
        record.samples.extend(self.snapshot());

        let dt = s(opts.dt);
        let mut step = 0;
        while as_secs(self.sim_time) < opts.t_end && step < opts.max_steps {
            let now = as_secs(self.sim_time);
            while let Some(cmd) = pending.next_if(|c| c.time <= now) {
                let reached = self.node.publish(&cmd.topic, &Double::new(cmd.value))?;
                if reached == 0 {
                    warn!(topic = %cmd.topic, "scheduled command has no subscriber");
                }
            }

            self.step(dt);
            step += 1;

            if step % opts.record_every == 0 {
                record.samples.extend(self.snapshot());
            }
        }

        // Always record final state
        if step % opts.record_every != 0 {
            record.samples.extend(self.snapshot());
        }
        Ok(record)
    }

    /// Current state of every joint.
    pub fn snapshot(&self) -> Vec<JointSample> {
        let t = as_secs(self.sim_time);
        self.ecm
            .entities_with::<JointTag>()
            .into_iter()
            .map(|joint| JointSample {
                t,
                joint: joint_label(&self.ecm, joint),
                velocity: self
                    .ecm
                    .component::<JointVelocity>(joint)
                    .and_then(|c| c.axis0()),
                velocity_cmd: self
                    .ecm
                    .component::<JointVelocityCmd>(joint)
                    .and_then(|c| c.axis0()),
                force_cmd: self
                    .ecm
                    .component::<JointForceCmd>(joint)
                    .and_then(|c| c.axis0()),
            })
            .collect()
    }
}

fn joint_label(ecm: &EntityComponentManager, joint: jc_core::Entity) -> String {
    let name = |e| {
        ecm.component::<Name>(e)
            .map(|n| n.0.clone())
            .unwrap_or_else(|| e.to_string())
    };
    match ecm.component::<ParentEntity>(joint) {
        Some(parent) => format!("{}/{}", name(parent.0), name(joint)),
        None => name(joint),
    }
}
