//! Dynamic decoding of schema-less JSON into [`FieldValue`]s.
//!
//! Field payloads of generic entries carry no type information, so each
//! value is probed against a fixed list of decoders and the first success
//! wins:
//!
//! 1. `null`
//! 2. bool, string, integer, float
//! 3. [`FileMetadata`], [`Link`], [`Location`]
//! 4. nested mapping, nested sequence
//!
//! The domain leaf types must be probed before the generic containers: they
//! are objects on the wire and would otherwise come back as plain mappings.
//! Mapping values and sequence elements use the same order.

use crate::{DecodeError, DecodeResult, FileMetadata, Link, Location};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::trace;

/// A dynamically decoded mapping of field names to values.
pub type FieldMap = HashMap<String, FieldValue>;

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    File(FileMetadata),
    Link(Link),
    Location(Location),
    Object(FieldMap),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value; integers are widened.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_file(&self) -> Option<&FileMetadata> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_location(&self) -> Option<Location> {
        match self {
            Self::Location(l) => Some(*l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&FieldMap> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The links of an array value, in order. Non-link elements are skipped.
    #[must_use]
    pub fn links(&self) -> Vec<&Link> {
        self.as_array()
            .map(|items| items.iter().filter_map(FieldValue::as_link).collect())
            .unwrap_or_default()
    }
}

/// Decodes a JSON object into a [`FieldMap`].
///
/// Keys whose value matches no probe are dropped. A non-object input is a
/// structural error.
pub fn decode_map(value: &Value) -> DecodeResult<FieldMap> {
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::shape_mismatch("a JSON object", value))?;
    let mut map = FieldMap::with_capacity(object.len());
    for (key, raw) in object {
        match decode_value(raw) {
            Some(decoded) => {
                map.insert(key.clone(), decoded);
            }
            None => trace!("Dropping undecodable value for key {}", key),
        }
    }
    Ok(map)
}

/// Decodes a JSON array into a sequence of [`FieldValue`]s.
///
/// Elements matching no probe are dropped. A non-array input is a
/// structural error.
pub fn decode_array(value: &Value) -> DecodeResult<Vec<FieldValue>> {
    let items = value
        .as_array()
        .ok_or_else(|| DecodeError::shape_mismatch("a JSON array", value))?;
    let mut out = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        match decode_value(raw) {
            Some(decoded) => out.push(decoded),
            None => trace!("Dropping undecodable array element at {}", index),
        }
    }
    Ok(out)
}

/// Runs the probe chain on a single value.
#[must_use]
pub fn decode_value(value: &Value) -> Option<FieldValue> {
    if value.is_null() {
        return Some(FieldValue::Null);
    }
    if let Some(b) = probe::<bool>(value) {
        return Some(FieldValue::Bool(b));
    }
    if let Some(s) = probe::<String>(value) {
        return Some(FieldValue::String(s));
    }
    if let Some(i) = probe::<i64>(value) {
        return Some(FieldValue::Integer(i));
    }
    if let Some(f) = probe::<f64>(value) {
        return Some(FieldValue::Float(f));
    }
    if let Some(file) = probe_object::<FileMetadata>(value) {
        return Some(FieldValue::File(file));
    }
    if let Some(link) = probe_object::<Link>(value) {
        return Some(FieldValue::Link(link));
    }
    if let Some(location) = probe_object::<Location>(value) {
        return Some(FieldValue::Location(location));
    }
    if let Ok(map) = decode_map(value) {
        return Some(FieldValue::Object(map));
    }
    if let Ok(items) = decode_array(value) {
        return Some(FieldValue::Array(items));
    }
    None
}

fn probe<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

// Derived struct decoders also accept JSON arrays (positional fields), so
// the leaf-type probes only run against objects.
fn probe_object<T: DeserializeOwned>(value: &Value) -> Option<T> {
    value.as_object()?;
    probe(value)
}
