//! Update actions and the collector that gathers them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{InvariantViolation, SyncError};

/// A named intent to change one aspect of a category.
///
/// Serializes flat, e.g. `{"action": "changeName", "name": {"en": "B"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "action")]
    pub name: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), payload: Map::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Like [`Action::with`], leaving the key out when `value` is `None`.
    pub fn with_opt(self, key: impl Into<String>, value: Option<Value>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn to_json(&self) -> Value {
        let mut out = Map::with_capacity(self.payload.len() + 1);
        out.insert("action".to_string(), Value::String(self.name.clone()));
        for (key, val) in &self.payload {
            out.insert(key.clone(), val.clone());
        }
        Value::Object(out)
    }
}

/// Gathers per-field results so that one failing field never hides the
/// actions of its siblings.
#[derive(Debug, Default)]
pub(crate) struct ActionCollector {
    actions: Vec<Action>,
    violations: Vec<InvariantViolation>,
}

impl ActionCollector {
    pub(crate) fn push(&mut self, result: Result<Option<Action>, InvariantViolation>) {
        match result {
            Ok(Some(action)) => self.actions.push(action),
            Ok(None) => {}
            Err(violation) => self.violation(violation),
        }
    }

    pub(crate) fn violation(&mut self, violation: InvariantViolation) {
        warn!(field = %violation.field, reason = %violation.reason, "skipping field");
        self.violations.push(violation);
    }

    /// Merge the outcome of a whole group of actions.
    pub(crate) fn absorb(&mut self, result: Result<Vec<Action>, SyncError>) -> Result<(), SyncError> {
        match result {
            Ok(actions) => self.actions.extend(actions),
            Err(SyncError::Invariant { actions, violations }) => {
                self.actions.extend(actions);
                self.violations.extend(violations);
            }
            Err(other) => return Err(other),
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Vec<Action>, SyncError> {
        if self.violations.is_empty() {
            Ok(self.actions)
        } else {
            Err(SyncError::Invariant { actions: self.actions, violations: self.violations })
        }
    }
}
