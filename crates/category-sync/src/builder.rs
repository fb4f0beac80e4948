//! Attribute-action builder: one optional action per catalog field.

use json_delta::{DeltaPatcher, ObjectDelta};
use serde_json::{Map, Value};
use sync_util::{clone, has_own_property, truthy_field};
use tracing::debug;

use crate::action::{Action, ActionCollector};
use crate::catalog::FieldEntry;
use crate::error::{InvariantViolation, SyncError};

/// Build the action for a single field.
///
/// A value counts as unset when the key is missing or the value is falsy
/// (`null`, `false`, `0`, `""`). In order:
///
/// 1. no delta for the field: nothing
/// 2. unset before and after: nothing
/// 3. unset before, set after: `{action, key: new}`
/// 4. set before, key missing after: nothing, the removal has no action
/// 5. set before, key present but unset after: `{action}`, clearing the value
/// 6. set before and after: `{action, key: patch(copy of old, delta)}`
///
/// Neither `old` nor `new` is mutated.
pub fn build_base_attributes_action<P>(
    entry: &FieldEntry,
    delta: &ObjectDelta,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    patcher: &P,
) -> Result<Option<Action>, InvariantViolation>
where
    P: DeltaPatcher + ?Sized,
{
    let key = entry.key;
    let Some(field_delta) = delta.get(key) else {
        return Ok(None);
    };

    match (truthy_field(old, key), truthy_field(new, key)) {
        (None, None) => {
            debug!(field = key, "delta between two unset values ignored");
            Ok(None)
        }
        (None, Some(now)) => Ok(Some(Action::new(entry.action).with(key, now.clone()))),
        (Some(_), None) if !has_own_property(new, key) => {
            // TODO: confirm with the API owners whether a removed key should map to the clear action.
            debug!(field = key, "removed field has no action");
            Ok(None)
        }
        (Some(_), None) => Ok(Some(Action::new(entry.action))),
        (Some(before), Some(_)) => {
            let patched = patcher
                .patch(clone(before), field_delta)
                .map_err(|err| InvariantViolation::patch(key, err))?;
            Ok(Some(Action::new(entry.action).with(key, patched)))
        }
    }
}

/// Run [`build_base_attributes_action`] over a catalog, in catalog order.
///
/// Every field is processed; failed fields are reported together in
/// [`SyncError::Invariant`] next to the actions built for the others.
pub fn build_catalog_actions<P>(
    catalog: &[FieldEntry],
    delta: &ObjectDelta,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    let mut collector = ActionCollector::default();
    for entry in catalog {
        collector.push(build_base_attributes_action(entry, delta, old, new, patcher));
    }
    collector.finish()
}
