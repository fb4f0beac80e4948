use std::fs;
use std::path::{Path, PathBuf};

use category_sync::Action;
use serde::Deserialize;
use serde_json::Value;

pub const EXPECTED_SCENARIO_COUNT: usize = 14;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// `base`, `references`, `meta`, `custom` or `all`.
    pub group: String,
    pub delta: Value,
    pub old: Value,
    pub new: Value,
    pub expected: Vec<Action>,
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn load_scenarios() -> Vec<Scenario> {
    let path = fixtures_dir().join("scenarios.json");
    let data = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path))
}
