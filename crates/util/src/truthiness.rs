//! Truthiness of JSON values.
//!
//! Category payloads come from a JavaScript API, where "not set" is spelled
//! several ways: a missing key, `null`, `""`, `0` or `false`. All of these are
//! falsy. Arrays and objects are truthy even when empty.

use serde_json::{Map, Value};

/// Returns `true` for `null`, `false`, `0`, `0.0` and `""`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sync_util::truthiness::is_falsy;
///
/// assert!(is_falsy(&json!("")));
/// assert!(is_falsy(&json!(0)));
/// assert!(!is_falsy(&json!({})));
/// ```
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

pub fn is_truthy(value: &Value) -> bool {
    !is_falsy(value)
}

/// Look up `key` in `obj`, treating a falsy value the same as a missing key.
pub fn truthy_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| is_truthy(v))
}
