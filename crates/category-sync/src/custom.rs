//! Custom-type and custom-fields reconciler.
//!
//! A category's `custom` bag is `{"type": {"typeId": "type", "id": …}, "fields": {…}}`.
//! Assigning a different type replaces the whole bag with one
//! `setCustomType`; otherwise each changed field becomes a `setCustomField`.

use json_delta::{AtomicChange, Delta, DeltaPatcher, ObjectDelta, StructuralChange};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::action::{Action, ActionCollector};
use crate::catalog::{CUSTOM_KEY, CUSTOM_TYPE_REFERENCE, SET_CUSTOM_FIELD, SET_CUSTOM_TYPE};
use crate::error::{InvariantViolation, SyncError};
use crate::resolve::resolve_value;

const TYPE_ID_PATH: &str = "/type/id";
const FIELDS_KEY: &str = "fields";

/// Emit the actions for a changed `custom` bag.
///
/// A change of `custom.type.id` yields a single `setCustomType` carrying the
/// complete fields bag, and suppresses any `setCustomField`.
pub fn actions_map_custom<P>(
    delta: &ObjectDelta,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    let custom = match delta.get(CUSTOM_KEY) {
        None => return Ok(Vec::new()),
        Some(Delta::Structural(StructuralChange::Object(custom))) => custom,
        Some(Delta::Atomic(_)) => {
            debug!("custom bag replaced as a whole; no custom actions");
            return Ok(Vec::new());
        }
        Some(Delta::Structural(StructuralChange::Array(_))) => {
            return Err(InvariantViolation::shape(CUSTOM_KEY, "object").into());
        }
    };
    let old_custom = old.get(CUSTOM_KEY);
    let new_custom = new.get(CUSTOM_KEY);

    if let Some(type_id) = custom.get("type").and_then(|t| t.get("id")) {
        return set_custom_type(custom, type_id, old_custom, new_custom, patcher).map(|a| vec![a]);
    }

    match custom.get(FIELDS_KEY) {
        Some(fields) => set_custom_fields(fields, old_custom, new_custom, patcher),
        None => Ok(Vec::new()),
    }
}

fn set_custom_type<P>(
    custom: &ObjectDelta,
    type_id: &Delta,
    old_custom: Option<&Value>,
    new_custom: Option<&Value>,
    patcher: &P,
) -> Result<Action, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    let id = resolve_value(
        type_id,
        old_custom.and_then(|c| c.pointer(TYPE_ID_PATH)),
        new_custom.and_then(|c| c.pointer(TYPE_ID_PATH)),
        patcher,
    )
    .map_err(|err| InvariantViolation::patch("custom.type.id", err))?;

    let new_fields = new_custom.and_then(|c| c.get(FIELDS_KEY));
    let fields = match custom.get(FIELDS_KEY) {
        Some(fields_delta) => resolve_value(
            fields_delta,
            old_custom.and_then(|c| c.get(FIELDS_KEY)),
            new_fields,
            patcher,
        )
        .map_err(|err| InvariantViolation::patch("custom.fields", err))?,
        None => new_fields.cloned(),
    };

    let mut reference = Map::new();
    reference.insert("typeId".to_string(), json!(CUSTOM_TYPE_REFERENCE));
    if let Some(id) = id {
        reference.insert("id".to_string(), id);
    }

    debug!(fields = fields.is_some(), "custom type reassigned");
    Ok(Action::new(SET_CUSTOM_TYPE)
        .with("type", Value::Object(reference))
        .with_opt(FIELDS_KEY, fields))
}

fn set_custom_fields<P>(
    fields: &Delta,
    old_custom: Option<&Value>,
    new_custom: Option<&Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    let old_fields = old_custom.and_then(|c| c.get(FIELDS_KEY));
    let new_fields = new_custom.and_then(|c| c.get(FIELDS_KEY));

    match fields {
        Delta::Structural(StructuralChange::Object(per_field)) => {
            let mut collector = ActionCollector::default();
            for (name, field_delta) in per_field {
                let value = resolve_value(
                    field_delta,
                    old_fields.and_then(|f| f.get(name)),
                    new_fields.and_then(|f| f.get(name)),
                    patcher,
                )
                .map(|value| Some(set_custom_field(name, value)))
                .map_err(|err| InvariantViolation::patch(format!("custom.fields.{name}"), err));
                collector.push(value);
            }
            collector.finish()
        }
        Delta::Atomic(change) => whole_bag_fields(change, old_fields, patcher),
        Delta::Structural(StructuralChange::Array(_)) => {
            Err(InvariantViolation::shape("custom.fields", "object").into())
        }
    }
}

/// The fields bag was added, replaced or removed in one piece while the type
/// stayed the same: set every field whose value differs, then unset every
/// field that is gone.
fn whole_bag_fields<P>(
    change: &AtomicChange,
    old_fields: Option<&Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    let new_bag = patcher
        .delta_value(change, old_fields)
        .map_err(|err| InvariantViolation::patch("custom.fields", err))?;
    let empty = Map::new();
    let old_bag = old_fields.and_then(Value::as_object).unwrap_or(&empty);
    let new_bag = match &new_bag {
        None => &empty,
        Some(Value::Object(bag)) => bag,
        Some(_) => return Err(InvariantViolation::shape("custom.fields", "object").into()),
    };

    let set = new_bag
        .iter()
        .filter(|(name, value)| old_bag.get(*name) != Some(*value))
        .map(|(name, value)| set_custom_field(name, Some(value.clone())));
    let unset = old_bag
        .keys()
        .filter(|name| !new_bag.contains_key(*name))
        .map(|name| set_custom_field(name, None));
    Ok(set.chain(unset).collect())
}

/// `setCustomField`; a missing value removes the field.
fn set_custom_field(name: &str, value: Option<Value>) -> Action {
    Action::new(SET_CUSTOM_FIELD)
        .with("name", Value::String(name.to_string()))
        .with_opt("value", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_delta::{from_json_object, JsonDiffPatcher};
    use serde_json::json;

    fn run(delta: Value, old: Value, new: Value) -> Result<Vec<Action>, SyncError> {
        let delta = from_json_object(&delta).unwrap();
        actions_map_custom(
            &delta,
            old.as_object().unwrap(),
            new.as_object().unwrap(),
            &JsonDiffPatcher,
        )
    }

    fn names(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn no_custom_delta() {
        assert!(run(json!({"name": ["A", "B"]}), json!({}), json!({})).unwrap().is_empty());
    }

    #[test]
    fn type_change_carries_whole_bag() {
        let actions = run(
            json!({"custom": {"type": {"id": ["t1", "t2"]}, "fields": {"color": ["red", "blue"]}}}),
            json!({"custom": {"type": {"typeId": "type", "id": "t1"}, "fields": {"color": "red", "size": 1}}}),
            json!({"custom": {"type": {"typeId": "type", "id": "t2"}, "fields": {"color": "blue", "size": 1}}}),
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::new("setCustomType")
                .with("type", json!({"typeId": "type", "id": "t2"}))
                .with("fields", json!({"color": "blue", "size": 1}))]
        );
    }

    #[test]
    fn type_change_with_atomic_fields_reads_the_delta() {
        let actions = run(
            json!({"custom": {"type": {"id": ["t1", "t2"]}, "fields": [{"a": 1}, {"b": 2}]}}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {"a": 1}}}),
            json!({"custom": {"type": {"id": "t2"}, "fields": {"b": 2}}}),
        )
        .unwrap();
        assert_eq!(actions[0].get("fields"), Some(&json!({"b": 2})));
    }

    #[test]
    fn type_change_without_fields_delta_uses_new_bag() {
        let actions = run(
            json!({"custom": {"type": {"id": ["t1", "t2"]}}}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {"a": 1}}}),
            json!({"custom": {"type": {"id": "t2"}, "fields": {"a": 1}}}),
        )
        .unwrap();
        assert_eq!(actions[0].get("fields"), Some(&json!({"a": 1})));
    }

    #[test]
    fn field_changes_fan_out_in_delta_order() {
        let actions = run(
            json!({"custom": {"fields": {
                "size": [1, 2],
                "color": ["red"],
                "tags": {"_t": "a", "1": ["b"]},
                "legacy": ["x", 0, 0]
            }}}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {"size": 1, "tags": ["a"], "legacy": "x"}}}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {"size": 2, "color": "red", "tags": ["a", "b"]}}}),
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                set_custom_field("size", Some(json!(2))),
                set_custom_field("color", Some(json!("red"))),
                set_custom_field("tags", Some(json!(["a", "b"]))),
                set_custom_field("legacy", None),
            ]
        );
        assert_eq!(actions[3].to_json(), json!({"action": "setCustomField", "name": "legacy"}));
    }

    #[test]
    fn type_change_suppresses_field_actions() {
        let actions = run(
            json!({"custom": {"type": {"id": ["t1"]}, "fields": {"color": ["red"]}}}),
            json!({}),
            json!({"custom": {"type": {"typeId": "type", "id": "t1"}, "fields": {"color": "red"}}}),
        )
        .unwrap();
        assert_eq!(names(&actions), ["setCustomType"]);
    }

    #[test]
    fn atomic_custom_bag_is_ignored() {
        let actions = run(
            json!({"custom": [{"type": {"id": "t1"}, "fields": {}}]}),
            json!({}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {}}}),
        )
        .unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn whole_bag_replacement_sets_and_unsets() {
        let actions = run(
            json!({"custom": {"fields": [{"a": 1, "b": 2}, {"b": 2, "c": 3}]}}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {"a": 1, "b": 2}}}),
            json!({"custom": {"type": {"id": "t1"}, "fields": {"b": 2, "c": 3}}}),
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![set_custom_field("c", Some(json!(3))), set_custom_field("a", None)]
        );
    }

    #[test]
    fn array_shaped_custom_delta_is_a_violation() {
        let err = run(json!({"custom": {"_t": "a", "0": ["x"]}}), json!({}), json!({})).unwrap_err();
        assert!(matches!(err, SyncError::Invariant { ref violations, .. } if violations[0].field == "custom"));
    }

    #[test]
    fn failing_field_keeps_siblings() {
        let err = run(
            json!({"custom": {"fields": {"a": ["", 2, 3], "b": [1, 2]}}}),
            json!({"custom": {"fields": {"a": 0, "b": 1}}}),
            json!({"custom": {"fields": {"a": 0, "b": 2}}}),
        )
        .unwrap_err();
        match err {
            SyncError::Invariant { actions, violations } => {
                assert_eq!(actions, vec![set_custom_field("b", Some(json!(2)))]);
                assert_eq!(violations[0].field, "custom.fields.a");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
