//! Field catalogs: which action updates which category field.
//!
//! Catalog order is the order in which actions are emitted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry {
    pub action: &'static str,
    pub key: &'static str,
}

impl FieldEntry {
    pub const fn new(action: &'static str, key: &'static str) -> Self {
        Self { action, key }
    }
}

pub const BASE_ACTIONS: &[FieldEntry] = &[
    FieldEntry::new("changeName", "name"),
    FieldEntry::new("changeSlug", "slug"),
    FieldEntry::new("setDescription", "description"),
    FieldEntry::new("changeOrderHint", "orderHint"),
    FieldEntry::new("setExternalId", "externalId"),
];

pub const META_ACTIONS: &[FieldEntry] = &[
    FieldEntry::new("setMetaTitle", "metaTitle"),
    FieldEntry::new("setMetaKeywords", "metaKeywords"),
    FieldEntry::new("setMetaDescription", "metaDescription"),
];

pub const PARENT_KEY: &str = "parent";
pub const CHANGE_PARENT: &str = "changeParent";

pub const CUSTOM_KEY: &str = "custom";
pub const SET_CUSTOM_TYPE: &str = "setCustomType";
pub const SET_CUSTOM_FIELD: &str = "setCustomField";
/// `typeId` of the reference carried by `setCustomType`.
pub const CUSTOM_TYPE_REFERENCE: &str = "type";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogs_do_not_overlap() {
        let keys: HashSet<&str> = BASE_ACTIONS.iter().chain(META_ACTIONS).map(|e| e.key).collect();
        assert_eq!(keys.len(), BASE_ACTIONS.len() + META_ACTIONS.len());
        assert!(!keys.contains(PARENT_KEY));
        assert!(!keys.contains(CUSTOM_KEY));
    }
}
