//! json-delta - typed jsondiffpatch-format deltas.
//!
//! A delta describes how one JSON value differs from another. This crate
//! does not compute deltas; it decodes them, applies them, and extracts the
//! new side of atomic changes.
//!
//! # Example
//!
//! ```
//! use json_delta::{from_json, patch};
//! use serde_json::json;
//!
//! let delta = from_json(&json!({"en": ["Shoes", "Boots"]})).unwrap();
//! let patched = patch(json!({"en": "Shoes", "de": "Schuhe"}), &delta).unwrap();
//! assert_eq!(patched, json!({"en": "Boots", "de": "Schuhe"}));
//! ```

pub mod apply;
pub mod codec;
pub mod patcher;
pub mod text;
pub mod types;

pub use apply::{delta_value, patch};
pub use codec::json::{decode_fields, from_json, from_json_object, object_to_json, to_json, DecodedFields};
pub use patcher::{DeltaPatcher, JsonDiffPatcher};
pub use types::{
    ArrayDelta, ArrayKey, AtomicChange, Delta, DeltaError, ObjectDelta, PatchError, StructuralChange,
};
