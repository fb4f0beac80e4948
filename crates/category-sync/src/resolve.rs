use json_delta::{Delta, DeltaPatcher, PatchError};
use serde_json::Value;

/// Resolve the new value of a field from its delta node.
///
/// An atomic change carries the new value itself. A structural change only
/// describes part of it, so the value is read from the new object instead.
pub(crate) fn resolve_value<P>(
    delta: &Delta,
    old: Option<&Value>,
    new: Option<&Value>,
    patcher: &P,
) -> Result<Option<Value>, PatchError>
where
    P: DeltaPatcher + ?Sized,
{
    match delta {
        Delta::Atomic(change) => patcher.delta_value(change, old),
        Delta::Structural(_) => Ok(new.cloned()),
    }
}
