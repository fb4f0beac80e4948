//! Core logic of the `category-actions` binary.
//!
//! Input is a JSON document `{"delta": …, "old": …, "new": …}`; output is
//! the pretty-printed action array.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::sync::CategorySync;

#[derive(Debug, Deserialize)]
struct ActionsRequest {
    delta: Value,
    #[serde(default)]
    old: Map<String, Value>,
    #[serde(default)]
    new: Map<String, Value>,
}

/// Build the actions for one request; `config` is an optional `SyncConfig` JSON string.
pub fn build_actions_json(input: &str, config: Option<&str>) -> Result<String, SyncError> {
    let config = match config {
        Some(raw) => SyncConfig::from_json_str(raw)?,
        None => SyncConfig::default(),
    };
    let request: ActionsRequest = serde_json::from_str(input)?;
    let actions = CategorySync::new(config).build_actions_from_json(
        &request.delta,
        &Value::Object(request.old),
        &Value::Object(request.new),
    )?;
    Ok(serde_json::to_string_pretty(&actions)?)
}
