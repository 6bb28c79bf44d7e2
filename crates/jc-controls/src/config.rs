//! Joint controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::params::Params;
use crate::pid::PidConfig;

/// Recognized option names.
pub mod keys {
    pub const JOINT_NAME: &str = "joint_name";
    pub const INITIAL_VELOCITY: &str = "initial_velocity";
    pub const USE_FORCE_COMMANDS: &str = "use_force_commands";
    pub const P_GAIN: &str = "p_gain";
    pub const I_GAIN: &str = "i_gain";
    pub const D_GAIN: &str = "d_gain";
    pub const I_MAX: &str = "i_max";
    pub const I_MIN: &str = "i_min";
    pub const CMD_MAX: &str = "cmd_max";
    pub const CMD_MIN: &str = "cmd_min";
    pub const CMD_OFFSET: &str = "cmd_offset";
    pub const TOPIC: &str = "topic";

    pub const ALL: [&str; 12] = [
        JOINT_NAME,
        INITIAL_VELOCITY,
        USE_FORCE_COMMANDS,
        P_GAIN,
        I_GAIN,
        D_GAIN,
        I_MAX,
        I_MIN,
        CMD_MAX,
        CMD_MIN,
        CMD_OFFSET,
        TOPIC,
    ];
}

/// How the set-point reaches the joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandMode {
    /// Set-point written directly as a velocity command.
    #[default]
    Velocity,
    /// Set-point tracked by a PID producing force commands.
    Force,
}

/// Immutable controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointControllerConfig {
    pub joint_name: String,
    pub initial_velocity: f64,
    pub mode: CommandMode,
    pub pid: PidConfig,
    /// Explicit topic; `None` derives one from the model and joint names.
    pub topic: Option<String>,
}

impl JointControllerConfig {
    /// Velocity-mode configuration for `joint_name` with all defaults.
    pub fn new(joint_name: impl Into<String>) -> Self {
        Self {
            joint_name: joint_name.into(),
            initial_velocity: 0.0,
            mode: CommandMode::Velocity,
            pid: PidConfig::default(),
            topic: None,
        }
    }

    /// Parse recognized options.
    ///
    /// # Errors
    ///
    /// - [`ControlError::MissingParam`] if `joint_name` is absent or empty
    /// - [`ControlError::InvalidParam`] if a recognized option has the wrong type
    pub fn from_params(params: &Params) -> ControlResult<Self> {
        let joint_name = params
            .get_string(keys::JOINT_NAME)?
            .filter(|name| !name.is_empty())
            .ok_or(ControlError::MissingParam {
                key: keys::JOINT_NAME,
            })?;

        let defaults = PidConfig::default();
        let pid = PidConfig {
            p_gain: params.f64_or(keys::P_GAIN, defaults.p_gain)?,
            i_gain: params.f64_or(keys::I_GAIN, defaults.i_gain)?,
            d_gain: params.f64_or(keys::D_GAIN, defaults.d_gain)?,
            i_max: params.f64_or(keys::I_MAX, defaults.i_max)?,
            i_min: params.f64_or(keys::I_MIN, defaults.i_min)?,
            cmd_max: params.f64_or(keys::CMD_MAX, defaults.cmd_max)?,
            cmd_min: params.f64_or(keys::CMD_MIN, defaults.cmd_min)?,
            cmd_offset: params.f64_or(keys::CMD_OFFSET, defaults.cmd_offset)?,
        };

        let mode = if params.bool_or(keys::USE_FORCE_COMMANDS, false)? {
            CommandMode::Force
        } else {
            CommandMode::Velocity
        };

        Ok(Self {
            joint_name,
            initial_velocity: params.f64_or(keys::INITIAL_VELOCITY, 0.0)?,
            mode,
            pid,
            topic: params.get_string(keys::TOPIC)?,
        })
    }

    pub fn with_mode(mut self, mode: CommandMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_pid(mut self, pid: PidConfig) -> Self {
        self.pid = pid;
        self
    }

    pub fn with_initial_velocity(mut self, v: f64) -> Self {
        self.initial_velocity = v;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Topic to subscribe to for a controller attached to `model_name`.
    pub fn topic_for(&self, model_name: &str) -> String {
        self.topic
            .clone()
            .unwrap_or_else(|| default_topic(model_name, &self.joint_name))
    }
}

/// `/model/<model>/joint/<joint>/cmd_vel`
pub fn default_topic(model_name: &str, joint_name: &str) -> String {
    format!("/model/{model_name}/joint/{joint_name}/cmd_vel")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = JointControllerConfig::from_params(&Params::new().with("joint_name", "wheel"))
            .unwrap();

        assert_eq!(cfg.joint_name, "wheel");
        assert_eq!(cfg.initial_velocity, 0.0);
        assert_eq!(cfg.mode, CommandMode::Velocity);
        assert_eq!(cfg.pid, PidConfig::default());
        assert_eq!(cfg.pid.cmd_max, 1000.0);
        assert_eq!(cfg.pid.i_min, -1.0);
        assert!(cfg.topic.is_none());
    }

    #[test]
    fn all_options() {
        let params = Params::new()
            .with("joint_name", "wheel")
            .with("initial_velocity", 1.5)
            .with("use_force_commands", true)
            .with("p_gain", 10.0)
            .with("i_gain", 0.5)
            .with("d_gain", 0.1)
            .with("i_max", 2.0)
            .with("i_min", -2.0)
            .with("cmd_max", 50.0)
            .with("cmd_min", -40.0)
            .with("cmd_offset", 0.25)
            .with("topic", "/wheel_cmd");
        let cfg = JointControllerConfig::from_params(&params).unwrap();

        assert_eq!(cfg.initial_velocity, 1.5);
        assert_eq!(cfg.mode, CommandMode::Force);
        assert_eq!(
            cfg.pid,
            PidConfig {
                p_gain: 10.0,
                i_gain: 0.5,
                d_gain: 0.1,
                i_max: 2.0,
                i_min: -2.0,
                cmd_max: 50.0,
                cmd_min: -40.0,
                cmd_offset: 0.25,
            }
        );
        assert_eq!(cfg.topic_for("cart"), "/wheel_cmd");
    }

    #[test]
    fn missing_or_empty_joint_name() {
        let err = JointControllerConfig::from_params(&Params::new()).unwrap_err();
        assert_eq!(err, ControlError::MissingParam { key: "joint_name" });

        let err =
            JointControllerConfig::from_params(&Params::new().with("joint_name", "")).unwrap_err();
        assert_eq!(err, ControlError::MissingParam { key: "joint_name" });
    }

    #[test]
    fn wrong_type_is_rejected() {
        let params = Params::new()
            .with("joint_name", "wheel")
            .with("p_gain", "fast");
        assert!(matches!(
            JointControllerConfig::from_params(&params),
            Err(ControlError::InvalidParam { .. })
        ));
    }

    #[test]
    fn derived_topic() {
        let cfg = JointControllerConfig::new("wheel");
        assert_eq!(cfg.topic_for("cart"), "/model/cart/joint/wheel/cmd_vel");
    }
}
