//! Codecs for deltas.

pub mod json;
