//! Action-group configuration.
//!
//! ```json
//! {"actionGroups": [{"type": "meta", "group": "ignore"}]}
//! ```
//!
//! Groups that are not listed are built. When a group is listed more than
//! once the last entry wins.

use serde::{Deserialize, Serialize};

use crate::catalog::{BASE_ACTIONS, CUSTOM_KEY, META_ACTIONS, PARENT_KEY};
use crate::error::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionGroupKind {
    Base,
    References,
    Meta,
    Custom,
}

impl ActionGroupKind {
    /// Build order of the groups.
    pub const ALL: [ActionGroupKind; 4] = [
        ActionGroupKind::Base,
        ActionGroupKind::References,
        ActionGroupKind::Meta,
        ActionGroupKind::Custom,
    ];

    /// Whether this group builds its actions from the top-level delta `key`.
    pub fn reads(self, key: &str) -> bool {
        match self {
            ActionGroupKind::Base => BASE_ACTIONS.iter().any(|entry| entry.key == key),
            ActionGroupKind::References => key == PARENT_KEY,
            ActionGroupKind::Meta => META_ACTIONS.iter().any(|entry| entry.key == key),
            ActionGroupKind::Custom => key == CUSTOM_KEY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupMode {
    Allow,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroup {
    #[serde(rename = "type")]
    pub kind: ActionGroupKind,
    pub group: GroupMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    pub action_groups: Vec<ActionGroup>,
}

impl SyncConfig {
    pub fn from_json_str(s: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn ignore(mut self, kind: ActionGroupKind) -> Self {
        self.action_groups.push(ActionGroup { kind, group: GroupMode::Ignore });
        self
    }

    pub fn allow(mut self, kind: ActionGroupKind) -> Self {
        self.action_groups.push(ActionGroup { kind, group: GroupMode::Allow });
        self
    }

    pub fn is_allowed(&self, kind: ActionGroupKind) -> bool {
        self.action_groups
            .iter()
            .rev()
            .find(|g| g.kind == kind)
            .map_or(true, |g| g.group == GroupMode::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_allows_everything() {
        let config = SyncConfig::from_json_str("{}").unwrap();
        assert!(ActionGroupKind::ALL.iter().all(|k| config.is_allowed(*k)));
    }

    #[test]
    fn parses_camel_case_groups() {
        let config = SyncConfig::from_json_str(
            r#"{"actionGroups": [{"type": "meta", "group": "ignore"}, {"type": "references", "group": "allow"}]}"#,
        )
        .unwrap();
        assert!(!config.is_allowed(ActionGroupKind::Meta));
        assert!(config.is_allowed(ActionGroupKind::References));
        assert!(config.is_allowed(ActionGroupKind::Base));
    }

    #[test]
    fn last_entry_wins() {
        let config = SyncConfig::default()
            .ignore(ActionGroupKind::Custom)
            .allow(ActionGroupKind::Custom);
        assert!(config.is_allowed(ActionGroupKind::Custom));
    }

    #[test]
    fn groups_know_their_fields() {
        assert!(ActionGroupKind::Base.reads("slug"));
        assert!(ActionGroupKind::References.reads("parent"));
        assert!(ActionGroupKind::Meta.reads("metaKeywords"));
        assert!(ActionGroupKind::Custom.reads("custom"));
        assert!(!ActionGroupKind::Base.reads("metaTitle"));
        assert!(!ActionGroupKind::ALL.iter().any(|k| k.reads("assets")));
    }

    #[test]
    fn rejects_unknown_group() {
        let err = SyncConfig::from_json_str(r#"{"actionGroups": [{"type": "prices", "group": "ignore"}]}"#);
        assert!(matches!(err, Err(SyncError::Json(_))));
    }
}
