//! Errors raised while building actions.

use json_delta::{DeltaError, PatchError};
use thiserror::Error;

use crate::action::Action;

/// Why a single field could not be turned into an action.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViolationReason {
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Malformed(#[from] DeltaError),
    #[error("expected {expected} delta")]
    Shape { expected: &'static str },
}

/// A delta node that cannot be interpreted for one field.
///
/// Building an action from such a node would produce a wrong action, so the
/// field is skipped and reported instead.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invariant violated at `{field}`: {reason}")]
pub struct InvariantViolation {
    pub field: String,
    pub reason: ViolationReason,
}

impl InvariantViolation {
    pub fn patch(field: impl Into<String>, err: PatchError) -> Self {
        Self { field: field.into(), reason: ViolationReason::Patch(err) }
    }

    pub fn malformed(field: impl Into<String>, err: DeltaError) -> Self {
        Self { field: field.into(), reason: ViolationReason::Malformed(err) }
    }

    pub fn shape(field: impl Into<String>, expected: &'static str) -> Self {
        Self { field: field.into(), reason: ViolationReason::Shape { expected } }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// Some fields failed. `actions` holds what their siblings produced.
    #[error("{} invariant violation(s)", .violations.len())]
    Invariant {
        actions: Vec<Action>,
        violations: Vec<InvariantViolation>,
    },
    #[error(transparent)]
    Delta(#[from] DeltaError),
    #[error("{0} must be a JSON object")]
    NotAnObject(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<InvariantViolation> for SyncError {
    fn from(violation: InvariantViolation) -> Self {
        SyncError::Invariant { actions: Vec::new(), violations: vec![violation] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_display() {
        let v = InvariantViolation::patch("name", PatchError::InvalidTarget);
        assert_eq!(v.to_string(), "invariant violated at `name`: INVALID_TARGET");

        let v = InvariantViolation::shape("custom", "object");
        assert_eq!(v.to_string(), "invariant violated at `custom`: expected object delta");

        let v = InvariantViolation::malformed("name", DeltaError::Malformed("bad".into()));
        assert_eq!(v.to_string(), "invariant violated at `name`: MALFORMED_DELTA: bad");
    }

    #[test]
    fn single_violation_converts_to_invariant_error() {
        let err: SyncError = InvariantViolation::shape("custom.type", "object").into();
        match err {
            SyncError::Invariant { actions, violations } => {
                assert!(actions.is_empty());
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
