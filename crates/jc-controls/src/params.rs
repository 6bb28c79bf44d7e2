//! String-keyed option maps handed to a controller at configuration time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// A single option value.
///
/// Text values are parsed on demand, so options coming from text-based scene
/// documents (`"true"`, `"0.5"`) read the same as typed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    fn describe(&self) -> String {
        match self {
            Self::Bool(b) => format!("bool {b}"),
            Self::Int(i) => format!("integer {i}"),
            Self::Float(f) => format!("float {f}"),
            Self::Text(s) => format!("text {s:?}"),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            Self::Text(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn as_string(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Option map for one controller instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Read `key` as a float, if present.
    pub fn get_f64(&self, key: &str) -> ControlResult<Option<f64>> {
        self.read(key, "float", ParamValue::as_f64)
    }

    /// Read `key` as a bool, if present.
    pub fn get_bool(&self, key: &str) -> ControlResult<Option<bool>> {
        self.read(key, "bool", ParamValue::as_bool)
    }

    /// Read `key` as a string, if present.
    pub fn get_string(&self, key: &str) -> ControlResult<Option<String>> {
        self.read(key, "string", ParamValue::as_string)
    }

    pub fn f64_or(&self, key: &str, default: f64) -> ControlResult<f64> {
        Ok(self.get_f64(key)?.unwrap_or(default))
    }

    pub fn bool_or(&self, key: &str, default: bool) -> ControlResult<bool> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    fn read<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl Fn(&ParamValue) -> Option<T>,
    ) -> ControlResult<Option<T>> {
        let Some(value) = self.0.get(key) else {
            return Ok(None);
        };
        convert(value)
            .map(Some)
            .ok_or_else(|| ControlError::InvalidParam {
                key: key.to_string(),
                expected,
                found: value.describe(),
            })
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads() {
        let params = Params::new()
            .with("p_gain", 2.5)
            .with("use_force_commands", true)
            .with("joint_name", "wheel");

        assert_eq!(params.get_f64("p_gain").unwrap(), Some(2.5));
        assert_eq!(params.get_bool("use_force_commands").unwrap(), Some(true));
        assert_eq!(
            params.get_string("joint_name").unwrap().as_deref(),
            Some("wheel")
        );
        assert_eq!(params.get_f64("missing").unwrap(), None);
    }

    #[test]
    fn text_values_are_parsed() {
        let params = Params::new()
            .with("i_max", " 0.75 ")
            .with("use_force_commands", "1");

        assert_eq!(params.f64_or("i_max", 1.0).unwrap(), 0.75);
        assert!(params.bool_or("use_force_commands", false).unwrap());
    }

    #[test]
    fn integers_widen_to_float() {
        let params = Params::new().with("cmd_max", 50_i64);
        assert_eq!(params.get_f64("cmd_max").unwrap(), Some(50.0));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let params = Params::new().with("p_gain", true).with("use_force_commands", 2.0);

        let err = params.get_f64("p_gain").unwrap_err();
        assert!(matches!(err, ControlError::InvalidParam { ref key, .. } if key == "p_gain"));
        assert!(params.get_bool("use_force_commands").is_err());
    }

    #[test]
    fn deserializes_from_yaml_map() {
        let yaml = "joint_name: wheel\np_gain: 3\nuse_force_commands: true\ni_min: -0.5\n";
        let params: Params = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(params.get_f64("p_gain").unwrap(), Some(3.0));
        assert_eq!(params.get_f64("i_min").unwrap(), Some(-0.5));
        assert_eq!(params.get_bool("use_force_commands").unwrap(), Some(true));
    }
}
