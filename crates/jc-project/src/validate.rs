//! World validation logic.

use std::collections::HashSet;

use jc_controls::JointControllerConfig;
use jc_controls::config::keys;
use jc_transport::normalize_topic;

use crate::schema::{CommandDef, LATEST_VERSION, ModelDef, PluginKind, World};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_world(world: &World) -> Result<(), ValidationError> {
    if world.version == 0 || world.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: world.version,
        });
    }

    let physics = &world.physics;
    if !physics.inertia.is_finite() || physics.inertia <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "physics inertia".to_string(),
            value: physics.inertia.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    if !physics.damping.is_finite() || physics.damping < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "physics damping".to_string(),
            value: physics.damping.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }

    let mut model_names = HashSet::new();
    for model in &world.models {
        if !model_names.insert(&model.name) {
            return Err(ValidationError::DuplicateName {
                name: model.name.clone(),
                context: "models".to_string(),
            });
        }
        validate_model(model)?;
    }

    for command in &world.commands {
        validate_command(command)?;
    }

    Ok(())
}

fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    if model.name.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "model name".to_string(),
            value: String::new(),
            reason: "must not be empty".to_string(),
        });
    }

    let mut joint_names = HashSet::new();
    for joint in &model.joints {
        if !joint_names.insert(&joint.name) {
            return Err(ValidationError::DuplicateName {
                name: joint.name.clone(),
                context: format!("model '{}' joints", model.name),
            });
        }
        if let Some(v) = joint.initial_velocity
            && !v.is_finite()
        {
            return Err(ValidationError::InvalidValue {
                field: format!("joint '{}/{}' initial_velocity", model.name, joint.name),
                value: v.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    Ok(())
}

/// Non-fatal findings about plugin parameters.
///
/// A controller whose parameters do not parse is still built, disabled, so
/// these never fail validation.
pub fn plugin_diagnostics(world: &World) -> Vec<String> {
    let mut out = Vec::new();
    for model in &world.models {
        for (i, plugin) in model.plugins.iter().enumerate() {
            match plugin.kind {
                PluginKind::JointController => {
                    if let Err(e) = JointControllerConfig::from_params(&plugin.params) {
                        out.push(format!(
                            "model '{}' plugin #{i}: {e}; controller will be disabled",
                            model.name
                        ));
                    }
                    for key in plugin.params.keys().filter(|k| !keys::ALL.contains(k)) {
                        out.push(format!(
                            "model '{}' plugin #{i}: unrecognized parameter '{key}'",
                            model.name
                        ));
                    }
                }
            }
        }
    }
    out
}

fn validate_command(command: &CommandDef) -> Result<(), ValidationError> {
    if !command.time.is_finite() || command.time < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("command '{}' time", command.topic),
            value: command.time.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    normalize_topic(&command.topic).map_err(|e| ValidationError::InvalidValue {
        field: "command topic".to_string(),
        value: command.topic.clone(),
        reason: e.to_string(),
    })?;
    Ok(())
}
