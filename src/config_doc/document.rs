//! Parsed config documents and key lookup/update on them.

use std::fmt;

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use super::ConfigFormat;
use super::key_path::{KeyPath, as_index};

/// The value currently stored under a search key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentValue {
    /// The key does not exist in the document.
    Missing,
    /// The key holds a string.
    Text(String),
    /// The key holds something else (number, bool, map, ...), rendered for logging.
    Other(String),
}

impl CurrentValue {
    /// Only a string with identical contents counts as already set.
    pub fn is(&self, expected: &str) -> bool {
        matches!(self, Self::Text(text) if text == expected)
    }
}

impl fmt::Display for CurrentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("<missing>"),
            Self::Text(value) | Self::Other(value) => f.write_str(value),
        }
    }
}

/// A path segment that cannot be followed when writing.
#[derive(Debug, PartialEq, Eq)]
pub struct PathConflict(pub String);

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Yaml(YamlValue),
    Json(JsonValue),
}

impl Document {
    pub fn parse(format: ConfigFormat, content: &str) -> Result<Self, String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map(Self::Yaml)
                .map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content)
                .map(Self::Json)
                .map_err(|e| e.to_string()),
        }
    }

    pub fn render(&self) -> Result<String, String> {
        match self {
            Self::Yaml(value) => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Self::Json(value) => serde_json::to_string_pretty(value)
                .map(|mut out| {
                    out.push('\n');
                    out
                })
                .map_err(|e| e.to_string()),
        }
    }

    pub fn get(&self, key: &KeyPath) -> CurrentValue {
        match self {
            Self::Yaml(root) => match yaml_lookup(root, key.segments()) {
                None => CurrentValue::Missing,
                Some(YamlValue::String(s)) => CurrentValue::Text(s.clone()),
                Some(other) => CurrentValue::Other(
                    serde_yaml::to_string(other)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default(),
                ),
            },
            Self::Json(root) => match json_lookup(root, key.segments()) {
                None => CurrentValue::Missing,
                Some(JsonValue::String(s)) => CurrentValue::Text(s.clone()),
                Some(other) => CurrentValue::Other(other.to_string()),
            },
        }
    }

    /// Set `key` to the string `value`, creating intermediate mappings as needed.
    pub fn set(&mut self, key: &KeyPath, value: &str) -> Result<(), PathConflict> {
        match self {
            Self::Yaml(root) => yaml_set(root, key.segments(), value),
            Self::Json(root) => json_set(root, key.segments(), value),
        }
    }
}

fn yaml_lookup<'a>(node: &'a YamlValue, segments: &[String]) -> Option<&'a YamlValue> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(node);
    };
    let child = match node {
        YamlValue::Mapping(map) => map.get(head.as_str())?,
        YamlValue::Sequence(seq) => seq.get(as_index(head)?)?,
        _ => return None,
    };
    yaml_lookup(child, rest)
}

fn yaml_set(node: &mut YamlValue, segments: &[String], value: &str) -> Result<(), PathConflict> {
    let Some((head, rest)) = segments.split_first() else {
        *node = YamlValue::String(value.to_string());
        return Ok(());
    };
    match node {
        YamlValue::Mapping(map) => {
            let child = map
                .entry(YamlValue::String(head.clone()))
                .or_insert(YamlValue::Null);
            yaml_set(child, rest, value)
        }
        YamlValue::Sequence(seq) => {
            let len = seq.len();
            let child = as_index(head)
                .and_then(|i| seq.get_mut(i))
                .ok_or_else(|| {
                    PathConflict(format!("{head} is not a valid index into a list of {len}"))
                })?;
            yaml_set(child, rest, value)
        }
        other => {
            *other = YamlValue::Mapping(serde_yaml::Mapping::new());
            yaml_set(other, segments, value)
        }
    }
}

fn json_lookup<'a>(node: &'a JsonValue, segments: &[String]) -> Option<&'a JsonValue> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(node);
    };
    let child = match node {
        JsonValue::Object(map) => map.get(head)?,
        JsonValue::Array(items) => items.get(as_index(head)?)?,
        _ => return None,
    };
    json_lookup(child, rest)
}

fn json_set(node: &mut JsonValue, segments: &[String], value: &str) -> Result<(), PathConflict> {
    let Some((head, rest)) = segments.split_first() else {
        *node = JsonValue::String(value.to_string());
        return Ok(());
    };
    match node {
        JsonValue::Object(map) => {
            let child = map.entry(head.clone()).or_insert(JsonValue::Null);
            json_set(child, rest, value)
        }
        JsonValue::Array(items) => {
            let len = items.len();
            let child = as_index(head)
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| {
                    PathConflict(format!("{head} is not a valid index into a list of {len}"))
                })?;
            json_set(child, rest, value)
        }
        other => {
            *other = JsonValue::Object(serde_json::Map::new());
            json_set(other, segments, value)
        }
    }
}
