//! JSON codec for deltas.
//!
//! Converts [`Delta`] to/from `serde_json::Value` in the jsondiffpatch
//! delta format.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::types::{
    ArrayDelta, ArrayKey, AtomicChange, Delta, DeltaError, ObjectDelta, StructuralChange,
    ARRAY_TAG, ARRAY_TAG_KEY, MARKER_DELETED, MARKER_MOVED, MARKER_TEXT_DIFF,
};

// ── Deserialization ───────────────────────────────────────────────────────

/// Decode a delta node.
///
/// Arrays become [`Delta::Atomic`], objects become [`Delta::Structural`].
/// Any other value, or an array that does not follow one of the five atomic
/// layouts, is rejected.
pub fn from_json(v: &Value) -> Result<Delta, DeltaError> {
    match v {
        Value::Array(items) => decode_atomic(items).map(Delta::Atomic),
        Value::Object(map) => decode_structural(map).map(Delta::Structural),
        other => Err(DeltaError::Malformed(format!(
            "expected array or object, got {other}"
        ))),
    }
}

/// Decode the top-level delta of an object.
pub fn from_json_object(v: &Value) -> Result<ObjectDelta, DeltaError> {
    match from_json(v)? {
        Delta::Structural(StructuralChange::Object(map)) => Ok(map),
        _ => Err(DeltaError::Malformed("expected object delta".into())),
    }
}

/// A top-level object delta decoded one key at a time.
///
/// Keys whose node could not be decoded land in `malformed` instead of
/// failing the whole delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFields {
    pub fields: ObjectDelta,
    pub malformed: IndexMap<String, DeltaError>,
}

/// Decode the top-level delta of an object, key by key.
///
/// Only a top level that is not an object delta is an error.
pub fn decode_fields(v: &Value) -> Result<DecodedFields, DeltaError> {
    let map = match v {
        Value::Object(map) if !map.contains_key(ARRAY_TAG_KEY) => map,
        _ => return Err(DeltaError::Malformed("expected object delta".into())),
    };
    let mut out = DecodedFields::default();
    for (key, val) in map {
        match from_json(val) {
            Ok(delta) => {
                out.fields.insert(key.clone(), delta);
            }
            Err(err) => {
                out.malformed.insert(key.clone(), err);
            }
        }
    }
    Ok(out)
}

fn decode_atomic(items: &[Value]) -> Result<AtomicChange, DeltaError> {
    match items {
        [new] => Ok(AtomicChange::Added(new.clone())),
        [old, new] => Ok(AtomicChange::Modified {
            old: old.clone(),
            new: new.clone(),
        }),
        [first, second, marker] => {
            let marker = marker
                .as_u64()
                .ok_or_else(|| DeltaError::Malformed(format!("invalid marker {marker}")))?;
            match marker {
                MARKER_DELETED if second.as_u64() == Some(0) => {
                    Ok(AtomicChange::Deleted(first.clone()))
                }
                MARKER_TEXT_DIFF => first
                    .as_str()
                    .map(|s| AtomicChange::TextDiff(s.to_string()))
                    .ok_or_else(|| DeltaError::Malformed("text diff must be a string".into())),
                MARKER_MOVED => second
                    .as_u64()
                    .map(|to| AtomicChange::Moved { to: to as usize })
                    .ok_or_else(|| DeltaError::Malformed("move target must be an index".into())),
                other => Err(DeltaError::Malformed(format!("unsupported marker {other}"))),
            }
        }
        _ => Err(DeltaError::Malformed(format!(
            "atomic change must have 1 to 3 elements, got {}",
            items.len()
        ))),
    }
}

fn decode_structural(map: &Map<String, Value>) -> Result<StructuralChange, DeltaError> {
    match map.get(ARRAY_TAG_KEY) {
        None => {
            let mut out = ObjectDelta::with_capacity(map.len());
            for (key, val) in map {
                out.insert(key.clone(), from_json(val)?);
            }
            Ok(StructuralChange::Object(out))
        }
        Some(Value::String(tag)) if tag == ARRAY_TAG => {
            let mut out = ArrayDelta::with_capacity(map.len().saturating_sub(1));
            for (key, val) in map {
                if key == ARRAY_TAG_KEY {
                    continue;
                }
                let index = ArrayKey::parse(key)
                    .ok_or_else(|| DeltaError::Malformed(format!("invalid array key {key:?}")))?;
                out.insert(index, from_json(val)?);
            }
            Ok(StructuralChange::Array(out))
        }
        Some(other) => Err(DeltaError::Malformed(format!("invalid array tag {other}"))),
    }
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize a [`Delta`] to the jsondiffpatch JSON format.
pub fn to_json(delta: &Delta) -> Value {
    match delta {
        Delta::Atomic(change) => atomic_to_json(change),
        Delta::Structural(StructuralChange::Object(map)) => object_to_json(map),
        Delta::Structural(StructuralChange::Array(entries)) => {
            let mut out = Map::new();
            out.insert(ARRAY_TAG_KEY.to_string(), json!(ARRAY_TAG));
            for (key, val) in entries {
                out.insert(key.to_key(), to_json(val));
            }
            Value::Object(out)
        }
    }
}

pub fn object_to_json(map: &ObjectDelta) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, val)| (key.clone(), to_json(val)))
            .collect(),
    )
}

fn atomic_to_json(change: &AtomicChange) -> Value {
    match change {
        AtomicChange::Added(new) => json!([new]),
        AtomicChange::Modified { old, new } => json!([old, new]),
        AtomicChange::Deleted(old) => json!([old, 0, MARKER_DELETED]),
        AtomicChange::TextDiff(text) => json!([text, 0, MARKER_TEXT_DIFF]),
        AtomicChange::Moved { to } => json!(["", to, MARKER_MOVED]),
    }
}
