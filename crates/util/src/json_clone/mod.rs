//! JSON cloning utilities.
//!
//! Patching a value mutates it in place, so every value handed to a patcher
//! is a deep copy made here.

mod clone;

pub use clone::clone;
