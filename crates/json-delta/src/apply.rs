//! Delta apply logic and value extraction.

use std::collections::HashMap;

use serde_json::{Map, Value};
use sync_util::clone;

use crate::text::apply_text_diff;
use crate::types::{ArrayDelta, ArrayKey, AtomicChange, Delta, ObjectDelta, PatchError, StructuralChange};

// ── Public API ────────────────────────────────────────────────────────────

/// Apply `delta` to `target` and return the patched value.
///
/// `target` is consumed and mutated in place; callers that need to keep
/// the original must pass a copy.
pub fn patch(mut target: Value, delta: &Delta) -> Result<Value, PatchError> {
    apply_delta(&mut target, delta)?;
    Ok(target)
}

/// The "new" side of an atomic change.
///
/// `original` is only consulted for text diffs, which describe the new value
/// relative to the old one. A deletion has no new side and yields `None`.
pub fn delta_value(change: &AtomicChange, original: Option<&Value>) -> Result<Option<Value>, PatchError> {
    match change {
        AtomicChange::Added(new) | AtomicChange::Modified { new, .. } => Ok(Some(new.clone())),
        AtomicChange::Deleted(_) => Ok(None),
        AtomicChange::TextDiff(_) => {
            let original = original.ok_or(PatchError::MissingOriginal)?;
            let mut value = clone(original);
            apply_atomic(&mut value, change)?;
            Ok(Some(value))
        }
        AtomicChange::Moved { .. } => Err(PatchError::UnexpectedMove),
    }
}

// ── Core recursive applier ────────────────────────────────────────────────

fn apply_delta(target: &mut Value, delta: &Delta) -> Result<(), PatchError> {
    match delta {
        Delta::Atomic(change) => apply_atomic(target, change),
        Delta::Structural(StructuralChange::Object(map)) => match target {
            Value::Object(obj) => apply_object(obj, map),
            _ => Err(PatchError::InvalidTarget),
        },
        Delta::Structural(StructuralChange::Array(entries)) => match target {
            Value::Array(arr) => apply_array(arr, entries),
            _ => Err(PatchError::InvalidTarget),
        },
    }
}

fn apply_atomic(target: &mut Value, change: &AtomicChange) -> Result<(), PatchError> {
    match change {
        AtomicChange::Added(new) | AtomicChange::Modified { new, .. } => {
            *target = new.clone();
            Ok(())
        }
        AtomicChange::TextDiff(patch_text) => match target {
            Value::String(s) => {
                *s = apply_text_diff(s, patch_text)?;
                Ok(())
            }
            _ => Err(PatchError::InvalidTarget),
        },
        AtomicChange::Deleted(_) => Err(PatchError::Deleted),
        AtomicChange::Moved { .. } => Err(PatchError::UnexpectedMove),
    }
}

fn apply_object(obj: &mut Map<String, Value>, map: &ObjectDelta) -> Result<(), PatchError> {
    for (key, sub) in map {
        match sub {
            Delta::Atomic(AtomicChange::Deleted(_)) => {
                obj.remove(key);
            }
            Delta::Atomic(AtomicChange::Added(new)) | Delta::Atomic(AtomicChange::Modified { new, .. }) => {
                obj.insert(key.clone(), new.clone());
            }
            _ => {
                let slot = obj.get_mut(key).ok_or(PatchError::InvalidTarget)?;
                apply_delta(slot, sub)?;
            }
        }
    }
    Ok(())
}

/// Removals first (highest old index first), then insertions (lowest new
/// index first), then in-place modifications at new indices.
fn apply_array(arr: &mut Vec<Value>, entries: &ArrayDelta) -> Result<(), PatchError> {
    let mut to_remove: Vec<usize> = Vec::new();
    let mut moves: Vec<(usize, usize)> = Vec::new();
    let mut to_insert: Vec<(usize, Value)> = Vec::new();
    let mut to_modify: Vec<(usize, &Delta)> = Vec::new();

    for (key, sub) in entries {
        match (key, sub) {
            (ArrayKey::Old(i), Delta::Atomic(AtomicChange::Deleted(_))) => to_remove.push(*i),
            (ArrayKey::Old(i), Delta::Atomic(AtomicChange::Moved { to })) => {
                to_remove.push(*i);
                moves.push((*i, *to));
            }
            (ArrayKey::Old(_), _) => return Err(PatchError::InvalidTarget),
            (ArrayKey::New(i), Delta::Atomic(AtomicChange::Added(new))) => to_insert.push((*i, new.clone())),
            (ArrayKey::New(i), other) => to_modify.push((*i, other)),
        }
    }

    to_remove.sort_unstable_by(|a, b| b.cmp(a));
    to_remove.dedup();
    let mut removed: HashMap<usize, Value> = HashMap::with_capacity(to_remove.len());
    for index in to_remove {
        if index >= arr.len() {
            return Err(PatchError::IndexOutOfBounds);
        }
        removed.insert(index, arr.remove(index));
    }

    for (from, to) in moves {
        let value = removed.remove(&from).ok_or(PatchError::IndexOutOfBounds)?;
        to_insert.push((to, value));
    }
    to_insert.sort_by_key(|(index, _)| *index);
    for (index, value) in to_insert {
        if index > arr.len() {
            return Err(PatchError::IndexOutOfBounds);
        }
        arr.insert(index, value);
    }

    for (index, sub) in to_modify {
        let slot = arr.get_mut(index).ok_or(PatchError::IndexOutOfBounds)?;
        apply_delta(slot, sub)?;
    }
    Ok(())
}
