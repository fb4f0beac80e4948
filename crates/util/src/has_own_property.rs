use serde_json::{Map, Value};

/// Check if an object has an own property with the given key.
///
/// A key that is present with a `null`, `""` or `false` value still counts as
/// present; only a missing key returns `false`.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Map, Value};
/// use sync_util::has_own_property::has_own_property;
///
/// let obj: Map<String, Value> = json!({"description": ""}).as_object().cloned().unwrap();
///
/// assert!(has_own_property(&obj, "description"));
/// assert!(!has_own_property(&obj, "slug"));
/// ```
pub fn has_own_property(obj: &Map<String, Value>, key: &str) -> bool {
    obj.contains_key(key)
}
