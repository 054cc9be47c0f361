//! Decoding and encoding of metadata blocks.
//!
//! The codec converts a raw metadata block into an ordered list of
//! key/value pairs using a neutral [`MetaValue`] representation, and
//! serializes such pairs back into either delimiter style. Duplicate
//! keys are rejected before the block is handed to the format parser,
//! so both styles behave identically.

use regex::Regex;
use serde::{Serialize, Serializer};

use super::split::MatterStyle;
use crate::error::{Error, Result};

/// A metadata value in the neutral representation shared by both styles.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// A text value, quoted or unquoted in the source.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A timestamp value, kept in its source representation.
    Datetime(String),
    /// A list of values.
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// Get the value as text, if it is a string or timestamp.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) | Self::Datetime(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a list, if it is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::String(v) | Self::Datetime(v) => serializer.serialize_str(v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::List(items) => serializer.collect_seq(items),
        }
    }
}

/// Decode a raw metadata block into ordered key/value pairs.
///
/// # Errors
///
/// Returns an error if a key appears more than once, if the block is not
/// a flat mapping, or if the underlying format parser rejects it.
pub fn decode(style: MatterStyle, block: &str) -> Result<Vec<(String, MetaValue)>> {
    scan_duplicate_keys(style, block)?;

    match style {
        MatterStyle::Yaml => decode_yaml(block),
        MatterStyle::Toml => decode_toml(block),
    }
}

/// Encode key/value pairs into a metadata block in the given style.
///
/// For canonically formatted blocks this is the exact inverse of
/// [`decode`]: one `key: value` or `key = value` line per pair, lists in
/// block style for YAML and inline style for TOML.
///
/// # Errors
///
/// Returns an error if a value cannot be represented in the target
/// format.
pub fn encode(style: MatterStyle, pairs: &[(String, MetaValue)]) -> Result<String> {
    if pairs.is_empty() {
        return Ok(String::new());
    }

    match style {
        MatterStyle::Yaml => encode_yaml(pairs),
        MatterStyle::Toml => encode_toml(pairs),
    }
}

/// Regex matching a top-level key line for the given style.
///
/// # Panics
///
/// Panics if the built-in pattern is invalid.
fn key_line_regex(style: MatterStyle) -> Regex {
    let pattern = match style {
        MatterStyle::Yaml => r"(?m)^([A-Za-z0-9_][A-Za-z0-9_-]*)\s*:",
        MatterStyle::Toml => r"(?m)^([A-Za-z0-9_][A-Za-z0-9_-]*)\s*=",
    };
    Regex::new(pattern).expect("invalid key line pattern")
}

/// Reject blocks in which a top-level key appears more than once.
///
/// Format parsers disagree here (YAML's last-wins vs TOML's hard error),
/// so uniqueness is checked before parsing to make both styles behave
/// the same way.
fn scan_duplicate_keys(style: MatterStyle, block: &str) -> Result<()> {
    let regex = key_line_regex(style);
    let mut seen: Vec<&str> = Vec::new();

    for captures in regex.captures_iter(block) {
        let key = captures.get(1).map_or("", |m| m.as_str());
        if seen.contains(&key) {
            return Err(Error::duplicate_key(key));
        }
        seen.push(key);
    }

    Ok(())
}

fn decode_yaml(block: &str) -> Result<Vec<(String, MetaValue)>> {
    let value: serde_yaml::Value = serde_yaml::from_str(block)?;

    let mapping = match value {
        serde_yaml::Value::Null => return Ok(Vec::new()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        _ => {
            return Err(Error::invalid_front_matter(
                "top level is not a key/value mapping",
            ))
        }
    };

    let mut pairs = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| Error::invalid_front_matter("non-string key in mapping"))?
            .to_string();
        let value = yaml_to_meta(&key, value)?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

fn yaml_to_meta(key: &str, value: serde_yaml::Value) -> Result<MetaValue> {
    match value {
        serde_yaml::Value::Null => Ok(MetaValue::String(String::new())),
        serde_yaml::Value::Bool(v) => Ok(MetaValue::Bool(v)),
        serde_yaml::Value::Number(v) => {
            if let Some(i) = v.as_i64() {
                Ok(MetaValue::Integer(i))
            } else {
                Ok(MetaValue::Float(v.as_f64().unwrap_or_default()))
            }
        }
        serde_yaml::Value::String(v) => Ok(MetaValue::String(v)),
        serde_yaml::Value::Sequence(items) => {
            let items = items
                .into_iter()
                .map(|item| yaml_to_meta(key, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(MetaValue::List(items))
        }
        serde_yaml::Value::Mapping(_) | serde_yaml::Value::Tagged(_) => Err(
            Error::invalid_front_matter(format!("unsupported nested value for key '{key}'")),
        ),
    }
}

fn decode_toml(block: &str) -> Result<Vec<(String, MetaValue)>> {
    let table: toml::Table = toml::from_str(block)?;

    let mut pairs = Vec::with_capacity(table.len());
    for (key, value) in table {
        let value = toml_to_meta(&key, value)?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

fn toml_to_meta(key: &str, value: toml::Value) -> Result<MetaValue> {
    match value {
        toml::Value::String(v) => Ok(MetaValue::String(v)),
        toml::Value::Integer(v) => Ok(MetaValue::Integer(v)),
        toml::Value::Float(v) => Ok(MetaValue::Float(v)),
        toml::Value::Boolean(v) => Ok(MetaValue::Bool(v)),
        toml::Value::Datetime(v) => Ok(MetaValue::Datetime(v.to_string())),
        toml::Value::Array(items) => {
            let items = items
                .into_iter()
                .map(|item| toml_to_meta(key, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(MetaValue::List(items))
        }
        toml::Value::Table(_) => Err(Error::invalid_front_matter(format!(
            "unsupported nested table for key '{key}'"
        ))),
    }
}

fn encode_yaml(pairs: &[(String, MetaValue)]) -> Result<String> {
    let mut mapping = serde_yaml::Mapping::with_capacity(pairs.len());
    for (key, value) in pairs {
        mapping.insert(
            serde_yaml::Value::String(key.clone()),
            meta_to_yaml(value),
        );
    }
    Ok(serde_yaml::to_string(&mapping)?)
}

fn meta_to_yaml(value: &MetaValue) -> serde_yaml::Value {
    match value {
        MetaValue::String(v) | MetaValue::Datetime(v) => serde_yaml::Value::String(v.clone()),
        MetaValue::Bool(v) => serde_yaml::Value::Bool(*v),
        MetaValue::Integer(v) => serde_yaml::Value::Number((*v).into()),
        MetaValue::Float(v) => serde_yaml::Value::Number((*v).into()),
        MetaValue::List(items) => {
            serde_yaml::Value::Sequence(items.iter().map(meta_to_yaml).collect())
        }
    }
}

fn encode_toml(pairs: &[(String, MetaValue)]) -> Result<String> {
    let mut table = toml::Table::with_capacity(pairs.len());
    for (key, value) in pairs {
        table.insert(key.clone(), meta_to_toml(key, value)?);
    }
    Ok(toml::to_string(&table)?)
}

fn meta_to_toml(key: &str, value: &MetaValue) -> Result<toml::Value> {
    match value {
        MetaValue::String(v) => Ok(toml::Value::String(v.clone())),
        MetaValue::Bool(v) => Ok(toml::Value::Boolean(*v)),
        MetaValue::Integer(v) => Ok(toml::Value::Integer(*v)),
        MetaValue::Float(v) => Ok(toml::Value::Float(*v)),
        MetaValue::Datetime(v) => {
            let datetime = v.parse::<toml::value::Datetime>().map_err(|_| {
                Error::invalid_front_matter(format!("invalid timestamp for key '{key}': {v}"))
            })?;
            Ok(toml::Value::Datetime(datetime))
        }
        MetaValue::List(items) => {
            let items = items
                .iter()
                .map(|item| meta_to_toml(key, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(toml::Value::Array(items))
        }
    }
}
