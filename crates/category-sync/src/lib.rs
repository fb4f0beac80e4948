//! category-sync - translate category deltas into update actions.
//!
//! Given a delta between an old and a new category, the functions here emit
//! the ordered list of update actions that turns the old category into the
//! new one. Each function covers one action group:
//!
//! - [`actions_map_base`]: name, slug, description, order hint, external id
//! - [`actions_map_references`]: the parent category
//! - [`actions_map_meta`]: meta title, keywords, description
//! - [`actions_map_custom`]: custom type and custom fields
//!
//! [`CategorySync`] runs all of them under an action-group configuration.
//!
//! ```
//! use category_sync::actions_map_base;
//! use json_delta::{from_json_object, JsonDiffPatcher};
//! use serde_json::json;
//!
//! let delta = from_json_object(&json!({"description": ["x", ""]})).unwrap();
//! let old = json!({"description": "x"});
//! let new = json!({"description": ""});
//! let actions = actions_map_base(
//!     &delta,
//!     old.as_object().unwrap(),
//!     new.as_object().unwrap(),
//!     &JsonDiffPatcher,
//! )
//! .unwrap();
//! assert_eq!(actions[0].to_json(), json!({"action": "setDescription"}));
//! ```

pub mod action;
pub mod builder;
pub mod catalog;
pub mod category_actions;
pub mod cli;
pub mod config;
pub mod custom;
pub mod error;
pub mod references;
mod resolve;
pub mod sync;

pub use action::Action;
pub use builder::{build_base_attributes_action, build_catalog_actions};
pub use catalog::{FieldEntry, BASE_ACTIONS, META_ACTIONS};
pub use category_actions::{actions_map_base, actions_map_meta};
pub use config::{ActionGroup, ActionGroupKind, GroupMode, SyncConfig};
pub use custom::actions_map_custom;
pub use error::{InvariantViolation, SyncError, ViolationReason};
pub use references::actions_map_references;
pub use sync::CategorySync;
