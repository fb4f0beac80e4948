//! sync-util - JSON value helpers shared by the category-sync crates.
//!
//! The action builders treat resources as plain `serde_json` objects, so the
//! helpers here answer three questions about such objects: does a key exist,
//! is its value set, and how to copy a value so that patching the copy never
//! touches the caller's data.

pub mod has_own_property;
pub mod json_clone;
pub mod truthiness;

// Re-exports for convenience
pub use has_own_property::has_own_property;
pub use json_clone::clone;
pub use truthiness::{is_falsy, is_truthy, truthy_field};
