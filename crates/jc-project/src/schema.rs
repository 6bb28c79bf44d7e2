//! World document schema.

use jc_controls::Params;
use serde::{Deserialize, Serialize};

/// Current world document version.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct World {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub physics: PhysicsDef,
    #[serde(default)]
    pub models: Vec<ModelDef>,
    #[serde(default)]
    pub commands: Vec<CommandDef>,
}

/// Joint dynamics shared by every joint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicsDef {
    #[serde(default = "default_inertia")]
    pub inertia: f64,
    #[serde(default)]
    pub damping: f64,
}

fn default_inertia() -> f64 {
    1.0
}

impl Default for PhysicsDef {
    fn default() -> Self {
        Self {
            inertia: default_inertia(),
            damping: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    pub name: String,
    #[serde(default)]
    pub joints: Vec<JointDef>,
    #[serde(default)]
    pub plugins: Vec<PluginDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JointDef {
    pub name: String,
    /// Joint velocity at t = 0; absent leaves the joint without a velocity record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_velocity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginDef {
    #[serde(rename = "type")]
    pub kind: PluginKind,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    JointController,
}

/// Set-point published at `time` seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandDef {
    pub time: f64,
    pub topic: String,
    pub value: f64,
}
