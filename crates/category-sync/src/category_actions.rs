//! Entry points for the catalog-driven action groups.

use json_delta::{DeltaPatcher, ObjectDelta};
use serde_json::{Map, Value};

use crate::action::Action;
use crate::builder::build_catalog_actions;
use crate::catalog::{BASE_ACTIONS, META_ACTIONS};
use crate::error::SyncError;

/// Actions for name, slug, description, order hint and external id.
pub fn actions_map_base<P>(
    delta: &ObjectDelta,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    build_catalog_actions(BASE_ACTIONS, delta, old, new, patcher)
}

/// Actions for meta title, keywords and description.
pub fn actions_map_meta<P>(
    delta: &ObjectDelta,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    patcher: &P,
) -> Result<Vec<Action>, SyncError>
where
    P: DeltaPatcher + ?Sized,
{
    build_catalog_actions(META_ACTIONS, delta, old, new, patcher)
}
