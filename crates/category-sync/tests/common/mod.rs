#![allow(dead_code)]

pub mod fixtures;

use serde_json::{Map, Value};

pub fn obj(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
