//! Error types for the ordkit library.
//!
//! ## Key Components
//!
//! - [`OrderedMapError`]: Returned by the fallible [`OrderedMap`] operations
//!   (duplicate insertion, missing-key lookup, pop on an empty map).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants`).
//!
//! ## Example Usage
//!
//! ```
//! use ordkit::ds::OrderedMap;
//! use ordkit::error::OrderedMapError;
//!
//! let mut map: OrderedMap<&str, i32> = OrderedMap::new();
//! map.push_back("a", 1).unwrap();
//!
//! let err = map.push_back("a", 2).unwrap_err();
//! assert_eq!(err, OrderedMapError::DuplicateKey);
//!
//! // Nothing to pop after draining
//! map.pop_back().unwrap();
//! assert_eq!(map.pop_back(), Err(OrderedMapError::EmptyContainer));
//! ```
//!
//! [`OrderedMap`]: crate::ds::OrderedMap

use std::fmt;

// ---------------------------------------------------------------------------
// OrderedMapError
// ---------------------------------------------------------------------------

/// Error returned by fallible [`OrderedMap`](crate::ds::OrderedMap) operations.
///
/// Every variant is caller-recoverable, and the map is left exactly as it was
/// before the failing call.
///
/// | Variant            | Raised by                  | Condition              |
/// |--------------------|----------------------------|------------------------|
/// | `DuplicateKey`     | `push_back`, `try_extend`  | key already present    |
/// | `KeyNotFound`      | `get`, `get_mut`, `get_key_value` | key absent      |
/// | `EmptyContainer`   | `pop_back`                 | map has zero entries   |
///
/// # Example
///
/// ```
/// use ordkit::ds::OrderedMap;
/// use ordkit::error::OrderedMapError;
///
/// let map: OrderedMap<String, u32> = OrderedMap::new();
/// match map.get("missing") {
///     Err(OrderedMapError::KeyNotFound) => {}
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderedMapError {
    /// `push_back` was called with a key that is already in the map.
    DuplicateKey,
    /// A lookup named a key that is not in the map.
    KeyNotFound,
    /// `pop_back` was called on a map with no entries.
    EmptyContainer,
}

impl OrderedMapError {
    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &'static str {
        match self {
            Self::DuplicateKey => "unable to push_back existing key",
            Self::KeyNotFound => "key not found",
            Self::EmptyContainer => "unable to pop_back from an empty map",
        }
    }
}

impl fmt::Display for OrderedMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for OrderedMapError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal map invariants are violated.
///
/// Produced by [`OrderedMap::check_invariants`](crate::ds::OrderedMap::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
