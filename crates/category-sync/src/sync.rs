//! All action groups of a category in one call.

use json_delta::{decode_fields, DeltaPatcher, JsonDiffPatcher, ObjectDelta};
use serde_json::{Map, Value};
use tracing::debug;

use crate::action::{Action, ActionCollector};
use crate::category_actions::{actions_map_base, actions_map_meta};
use crate::config::{ActionGroupKind, SyncConfig};
use crate::custom::actions_map_custom;
use crate::error::{InvariantViolation, SyncError};
use crate::references::actions_map_references;

/// Builds the update actions of every allowed action group, in the order
/// base, references, meta, custom.
///
/// # Example
///
/// ```
/// use category_sync::CategorySync;
/// use serde_json::json;
///
/// let sync = CategorySync::default();
/// let actions = sync
///     .build_actions_from_json(
///         &json!({"name": ["A", "B"]}),
///         &json!({"name": "A"}),
///         &json!({"name": "B"}),
///     )
///     .unwrap();
/// assert_eq!(actions[0].to_json(), json!({"action": "changeName", "name": "B"}));
/// ```
#[derive(Debug, Clone)]
pub struct CategorySync<P = JsonDiffPatcher> {
    config: SyncConfig,
    patcher: P,
}

impl CategorySync<JsonDiffPatcher> {
    pub fn new(config: SyncConfig) -> Self {
        Self { config, patcher: JsonDiffPatcher }
    }
}

impl Default for CategorySync<JsonDiffPatcher> {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

impl<P: DeltaPatcher> CategorySync<P> {
    pub fn with_patcher(config: SyncConfig, patcher: P) -> Self {
        Self { config, patcher }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn build_actions(
        &self,
        delta: &ObjectDelta,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
    ) -> Result<Vec<Action>, SyncError> {
        let mut collector = ActionCollector::default();
        for kind in ActionGroupKind::ALL {
            if !self.config.is_allowed(kind) {
                debug!(group = ?kind, "action group ignored");
                continue;
            }
            collector.absorb(self.build_group(kind, delta, old, new))?;
        }
        collector.finish()
    }

    /// Decode the delta and check both objects, then [`build_actions`](Self::build_actions).
    ///
    /// A field whose delta node cannot be decoded is reported as an
    /// [`InvariantViolation`] when an allowed group reads it; the other
    /// fields are still built.
    pub fn build_actions_from_json(&self, delta: &Value, old: &Value, new: &Value) -> Result<Vec<Action>, SyncError> {
        let decoded = decode_fields(delta)?;
        let old = old.as_object().ok_or(SyncError::NotAnObject("old"))?;
        let new = new.as_object().ok_or(SyncError::NotAnObject("new"))?;

        let mut collector = ActionCollector::default();
        for (key, err) in decoded.malformed {
            if self.reads(&key) {
                collector.violation(InvariantViolation::malformed(key, err));
            } else {
                debug!(field = %key, "malformed delta for an unmapped field ignored");
            }
        }
        collector.absorb(self.build_actions(&decoded.fields, old, new))?;
        collector.finish()
    }

    fn reads(&self, key: &str) -> bool {
        ActionGroupKind::ALL
            .into_iter()
            .any(|kind| self.config.is_allowed(kind) && kind.reads(key))
    }

    fn build_group(
        &self,
        kind: ActionGroupKind,
        delta: &ObjectDelta,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
    ) -> Result<Vec<Action>, SyncError> {
        let patcher = &self.patcher;
        match kind {
            ActionGroupKind::Base => actions_map_base(delta, old, new, patcher),
            ActionGroupKind::References => actions_map_references(delta, old, new, patcher),
            ActionGroupKind::Meta => actions_map_meta(delta, old, new, patcher),
            ActionGroupKind::Custom => actions_map_custom(delta, old, new, patcher),
        }
    }
}
