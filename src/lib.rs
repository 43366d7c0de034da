//! ordkit: insertion-ordered map with stack-style removal.
//!
//! [`OrderedMap`](ds::OrderedMap) maps unique keys to values, iterates in
//! insertion order, and only removes entries from the most recently inserted
//! end. Failures (duplicate key, missing key, pop on empty) are reported as
//! [`OrderedMapError`](error::OrderedMapError) values, never as panics.

pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
