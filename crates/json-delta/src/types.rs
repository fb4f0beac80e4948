//! Core types for jsondiffpatch-format deltas.
//!
//! A delta node is either an atomic change (a short JSON array whose length
//! and trailing marker encode the kind of change) or a structural change (a
//! JSON object holding one sub-delta per changed key or array index).

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

// ── Markers ───────────────────────────────────────────────────────────────

/// Third element of a `[old, 0, 0]` deletion.
pub const MARKER_DELETED: u64 = 0;
/// Third element of a `[unidiff, 0, 2]` text diff.
pub const MARKER_TEXT_DIFF: u64 = 2;
/// Third element of a `["", to, 3]` array move.
pub const MARKER_MOVED: u64 = 3;
/// Key that tags a structural change as an array delta (`"_t": "a"`).
pub const ARRAY_TAG_KEY: &str = "_t";
pub const ARRAY_TAG: &str = "a";

// ── Errors ────────────────────────────────────────────────────────────────

/// A JSON value that is not a delta node.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeltaError {
    #[error("MALFORMED_DELTA: {0}")]
    Malformed(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("INVALID_TARGET")]
    InvalidTarget,
    #[error("DELETED")]
    Deleted,
    #[error("MISSING_ORIGINAL")]
    MissingOriginal,
    #[error("UNEXPECTED_MOVE")]
    UnexpectedMove,
    #[error("TEXT_MISMATCH")]
    TextMismatch,
    #[error("INVALID_HUNK: {0}")]
    InvalidHunk(String),
    #[error("INDEX_OUT_OF_BOUNDS")]
    IndexOutOfBounds,
}

// ── Delta ─────────────────────────────────────────────────────────────────

/// Whole-value replacement of a single node.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicChange {
    /// `[new]`
    Added(Value),
    /// `[old, new]`
    Modified { old: Value, new: Value },
    /// `[old, 0, 0]`
    Deleted(Value),
    /// `[unidiff, 0, 2]`, a diff-match-patch patch of a long string.
    TextDiff(String),
    /// `["", to, 3]`, only meaningful under an `_i` key of an array delta.
    Moved { to: usize },
}

/// Index key of an array delta entry.
///
/// `"3"` addresses index 3 of the new array, `"_3"` index 3 of the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrayKey {
    New(usize),
    Old(usize),
}

pub type ObjectDelta = IndexMap<String, Delta>;
pub type ArrayDelta = IndexMap<ArrayKey, Delta>;

#[derive(Debug, Clone, PartialEq)]
pub enum StructuralChange {
    Object(ObjectDelta),
    Array(ArrayDelta),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Atomic(AtomicChange),
    Structural(StructuralChange),
}

impl Delta {
    pub fn as_atomic(&self) -> Option<&AtomicChange> {
        match self {
            Delta::Atomic(change) => Some(change),
            Delta::Structural(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDelta> {
        match self {
            Delta::Structural(StructuralChange::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Sub-delta of an object delta. `None` for any other node kind.
    pub fn get(&self, key: &str) -> Option<&Delta> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Delta::Atomic(_))
    }
}

impl ArrayKey {
    /// Parses `"3"` / `"_3"`.
    pub fn parse(key: &str) -> Option<ArrayKey> {
        match key.strip_prefix('_') {
            Some(rest) => rest.parse().ok().map(ArrayKey::Old),
            None => key.parse().ok().map(ArrayKey::New),
        }
    }

    pub fn to_key(self) -> String {
        match self {
            ArrayKey::New(i) => i.to_string(),
            ArrayKey::Old(i) => format!("_{i}"),
        }
    }
}
