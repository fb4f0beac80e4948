use serde_json::{Map, Value};

/// Creates a deep clone of any JSON value.
///
/// Every nested object and array in the result is a fresh allocation, so
/// mutating the clone can never be observed through the original.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sync_util::json_clone::clone;
///
/// let original = json!({"en": "Shoes", "tags": ["a"]});
/// let mut copy = clone(&original);
/// copy["en"] = json!("Boots");
///
/// assert_eq!(original["en"], json!("Shoes"));
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => {
            let mut new_obj = Map::with_capacity(obj.len());
            for (key, val) in obj {
                new_obj.insert(key.clone(), clone(val));
            }
            Value::Object(new_obj)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_clone_scalars() {
        for value in [json!(null), json!(true), json!(42), json!(1.5), json!("hello")] {
            assert_eq!(clone(&value), value);
        }
    }

    #[test]
    fn test_clone_nested() {
        let value = json!({
            "name": {"en": "Shoes", "de": "Schuhe"},
            "ancestors": [{"typeId": "category", "id": "p1"}],
            "orderHint": "0.5"
        });
        assert_eq!(clone(&value), value);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = json!({"fields": {"color": ["red", "blue"]}});
        let mut cloned = clone(&original);

        cloned["fields"]["color"][0] = json!("green");
        cloned["fields"]
            .as_object_mut()
            .unwrap()
            .insert("size".to_string(), json!(42));

        assert_eq!(original, json!({"fields": {"color": ["red", "blue"]}}));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_clone_equals_original(value in arb_json()) {
            prop_assert_eq!(clone(&value), value);
        }
    }
}
