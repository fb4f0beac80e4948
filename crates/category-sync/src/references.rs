//! Reference reconciler for the hierarchical `parent` pointer.

use json_delta::{DeltaPatcher, ObjectDelta};
use serde_json::{Map, Value};
use tracing::debug;

use crate::action::Action;
use crate::catalog::{CHANGE_PARENT, PARENT_KEY};
use crate::error::{InvariantViolation, SyncError};
use crate::resolve::resolve_value;

/// Emit `changeParent` when the parent reference changed.
///
/// The `parent` payload is left out when the parent was removed.
pub fn actions_map_references<P>(
    delta: &ObjectDelta,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    let Some(parent_delta) = delta.get(PARENT_KEY) else {
        return Ok(Vec::new());
    };

    let parent = resolve_value(parent_delta, old.get(PARENT_KEY), new.get(PARENT_KEY), patcher)
        .map_err(|err| InvariantViolation::patch(PARENT_KEY, err))?;
    if parent.is_none() {
        debug!("parent removed; changeParent carries no reference");
    }

    Ok(vec![Action::new(CHANGE_PARENT).with_opt(PARENT_KEY, parent)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_delta::{from_json_object, JsonDiffPatcher};
    use serde_json::json;

    fn run(delta: Value, old: Value, new: Value) -> Result<Vec<Action>, SyncError> {
        let delta = from_json_object(&delta).unwrap();
        actions_map_references(
            &delta,
            old.as_object().unwrap(),
            new.as_object().unwrap(),
            &JsonDiffPatcher,
        )
    }

    #[test]
    fn no_parent_delta() {
        let actions = run(json!({"name": ["A", "B"]}), json!({}), json!({})).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn atomic_parent_change_reads_the_delta() {
        let actions = run(
            json!({"parent": [{"typeId": "category", "id": "p1"}, {"typeId": "category", "id": "p2"}]}),
            json!({"parent": {"typeId": "category", "id": "p1"}}),
            // deliberately stale: the atomic delta wins
            json!({"parent": {"typeId": "category", "id": "stale"}}),
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::new("changeParent").with("parent", json!({"typeId": "category", "id": "p2"}))]
        );
    }

    #[test]
    fn structural_parent_change_reads_new_object() {
        let actions = run(
            json!({"parent": {"id": ["p1", "p2"]}}),
            json!({"parent": {"typeId": "category", "id": "p1"}}),
            json!({"parent": {"typeId": "category", "id": "p2"}}),
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::new("changeParent").with("parent", json!({"typeId": "category", "id": "p2"}))]
        );
    }

    #[test]
    fn removed_parent_omits_reference() {
        let actions = run(
            json!({"parent": [{"typeId": "category", "id": "p1"}, 0, 0]}),
            json!({"parent": {"typeId": "category", "id": "p1"}}),
            json!({}),
        )
        .unwrap();
        assert_eq!(actions, vec![Action::new("changeParent")]);
    }

    #[test]
    fn moved_parent_is_a_violation() {
        let err = run(json!({"parent": ["", 1, 3]}), json!({}), json!({})).unwrap_err();
        match err {
            SyncError::Invariant { actions, violations } => {
                assert!(actions.is_empty());
                assert_eq!(violations[0].field, "parent");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
