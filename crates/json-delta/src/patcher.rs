//! The seam between action builders and a delta engine.

use serde_json::Value;

use crate::apply;
use crate::types::{AtomicChange, Delta, PatchError};

/// The two delta operations the action builders rely on.
pub trait DeltaPatcher {
    /// Apply `delta` to `target`, which the patcher is free to mutate.
    fn patch(&self, target: Value, delta: &Delta) -> Result<Value, PatchError>;

    /// The new side of an atomic change; `original` is the old value, needed
    /// to resolve text diffs.
    fn delta_value(&self, change: &AtomicChange, original: Option<&Value>) -> Result<Option<Value>, PatchError>;
}

/// [`DeltaPatcher`] for deltas in the jsondiffpatch format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonDiffPatcher;

impl DeltaPatcher for JsonDiffPatcher {
    fn patch(&self, target: Value, delta: &Delta) -> Result<Value, PatchError> {
        apply::patch(target, delta)
    }

    fn delta_value(&self, change: &AtomicChange, original: Option<&Value>) -> Result<Option<Value>, PatchError> {
        apply::delta_value(change, original)
    }
}

impl<P: DeltaPatcher + ?Sized> DeltaPatcher for &P {
    fn patch(&self, target: Value, delta: &Delta) -> Result<Value, PatchError> {
        (**self).patch(target, delta)
    }

    fn delta_value(&self, change: &AtomicChange, original: Option<&Value>) -> Result<Option<Value>, PatchError> {
        (**self).delta_value(change, original)
    }
}
