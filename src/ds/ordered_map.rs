//! Insertion-ordered map with stack-style removal.
//!
//! Keeps every entry in a `Vec` in the order it was pushed, plus a hash index
//! from key to position. Entries are only ever appended at the tail and
//! removed from the tail, so recorded positions never shift.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                       OrderedMap<K, V, S> Layout                            │
//! │                                                                             │
//! │   index: HashMap<K, usize, S>         entries: Vec<(K, V)>                  │
//! │                                                                             │
//! │   ┌──────────┬──────┐                 pos   0          1         2          │
//! │   │   Key    │ pos  │                    ┌──────────┬─────────┬─────────┐   │
//! │   ├──────────┼──────┤                    │("Terry", │("Gary", │("Jim",  │   │
//! │   │ "Gary"   │  1   │ ──────────────────►│   52)    │   10)   │   34)   │   │
//! │   │ "Jim"    │  2   │                    └──────────┴─────────┴─────────┘   │
//! │   │ "Terry"  │  0   │                      front                 back       │
//! │   └──────────┴──────┘                      oldest              newest       │
//! │                                                                             │
//! │   push_back(k, v):                    pop_back():                           │
//! │     1. reject if k in index             1. entries.pop() → (k, v)           │
//! │     2. index[k] = entries.len()         2. index.remove(k)                  │
//! │     3. entries.push((k, v))             3. return (k, v)                    │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation            | Description                          | Complexity   |
//! |----------------------|--------------------------------------|--------------|
//! | [`push_back`]        | Append a new key at the tail         | O(1) amort.  |
//! | [`pop_back`]         | Remove and return the tail entry     | O(1) avg     |
//! | [`get`] / [`get_mut`]| Borrow a value by key                | O(1) avg     |
//! | [`contains_key`]     | Key existence check                  | O(1) avg     |
//! | [`position`]         | Insertion position of a key          | O(1) avg     |
//! | [`back`] / [`front`] | Peek newest / oldest entry           | O(1)         |
//! | [`len`] / [`is_empty`]| Entry count                         | O(1)         |
//! | [`iter`]             | Entries oldest-first                 | O(n)         |
//!
//! [`push_back`]: OrderedMap::push_back
//! [`pop_back`]: OrderedMap::pop_back
//! [`get`]: OrderedMap::get
//! [`get_mut`]: OrderedMap::get_mut
//! [`contains_key`]: OrderedMap::contains_key
//! [`position`]: OrderedMap::position
//! [`back`]: OrderedMap::back
//! [`front`]: OrderedMap::front
//! [`len`]: OrderedMap::len
//! [`is_empty`]: OrderedMap::is_empty
//! [`iter`]: OrderedMap::iter
//!
//! ## Example Usage
//!
//! ```
//! use ordkit::ds::OrderedMap;
//! use ordkit::error::OrderedMapError;
//!
//! let mut ages = OrderedMap::new();
//! ages.push_back("Terry", 52).unwrap();
//! ages.push_back("Gary", 10).unwrap();
//! ages.push_back("Jim", 34).unwrap();
//! assert_eq!(ages.len(), 3);
//!
//! // Mutate in place through the handle
//! *ages.get_mut("Terry").unwrap() = 53;
//!
//! // Stack-style removal from the tail
//! assert_eq!(ages.pop_back(), Ok(("Jim", 34)));
//! assert_eq!(ages.pop_back(), Ok(("Gary", 10)));
//!
//! let rest: Vec<_> = ages.iter().collect();
//! assert_eq!(rest, vec![(&"Terry", &53)]);
//!
//! // Duplicate keys are rejected
//! assert_eq!(ages.push_back("Terry", 101), Err(OrderedMapError::DuplicateKey));
//! assert_eq!(ages.get("Terry"), Ok(&53));
//! ```
//!
//! ## Thread Safety
//!
//! `OrderedMap` performs no internal synchronization. Concurrent mutation
//! needs external locking (e.g. `Mutex<OrderedMap<K, V>>`). The map is `Send`
//! and `Sync` whenever `K`, `V` and the hasher are, with or without the
//! `metrics` feature.
//!
//! ## Implementation Notes
//!
//! - Keys are stored twice (index and entries), hence `K: Clone` on insert.
//! - Default hasher is `FxBuildHasher`; any `BuildHasher` can be supplied.
//! - Borrows returned by `get_mut` and the iterators are tied to the map, so
//!   structural mutation while they are alive does not compile.
//! - `check_invariants()` is always available; `debug_validate_invariants()`
//!   in debug/test builds.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use rustc_hash::FxBuildHasher;

use crate::error::{InvariantError, OrderedMapError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::OrderedMapMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::OrderedMapMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, OrderedMapMetricsReadRecorder,
    OrderedMapMetricsRecorder,
};

/// Map of unique keys to values that remembers insertion order.
///
/// New entries go to the tail with [`push_back`](Self::push_back); the only
/// way to remove an entry is [`pop_back`](Self::pop_back), which takes the
/// most recently inserted one. Iteration always runs oldest to newest.
///
/// # Type Parameters
///
/// - `K`: Key type, `Eq + Hash` for lookup and `Clone` for insertion
/// - `V`: Value type, unconstrained
/// - `S`: Hasher for the key index (defaults to [`FxBuildHasher`])
///
/// # Example
///
/// ```
/// use ordkit::ds::OrderedMap;
///
/// let mut config: OrderedMap<String, String> = OrderedMap::new();
/// config.push_back("host".into(), "localhost".into()).unwrap();
/// config.push_back("port".into(), "8080".into()).unwrap();
///
/// // Borrowed lookups work for String keys
/// assert_eq!(config.get("port").map(String::as_str), Ok("8080"));
///
/// // Declaration order is preserved
/// let keys: Vec<_> = config.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["host", "port"]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, S = FxBuildHasher> {
    /// key -> position in `entries`
    index: HashMap<K, usize, S>,
    /// (key, value) pairs, oldest first
    entries: Vec<(K, V)>,
    #[cfg(feature = "metrics")]
    metrics: OrderedMapMetrics,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map using the default hasher.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let map: OrderedMap<u32, &str> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.len(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher)
    }

    /// Creates an empty map with room for `capacity` entries in both the
    /// index and the entry sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let map: OrderedMap<u32, u32> = OrderedMap::with_capacity(64);
    /// assert!(map.capacity() >= 64);
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }

    /// Builds a map from `(key, value)` pairs in iteration order.
    ///
    /// Fails with [`OrderedMapError::DuplicateKey`] on the first repeated key.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    /// use ordkit::error::OrderedMapError;
    ///
    /// let map = OrderedMap::try_from_iter([("a", 1), ("b", 2)]).unwrap();
    /// assert_eq!(map.back(), Some((&"b", &2)));
    ///
    /// let dup = OrderedMap::try_from_iter([("a", 1), ("a", 2)]);
    /// assert_eq!(dup.unwrap_err(), OrderedMapError::DuplicateKey);
    /// ```
    pub fn try_from_iter<I>(iter: I) -> Result<Self, OrderedMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Eq + Hash + Clone,
    {
        let mut map = Self::new();
        map.try_extend(iter)?;
        Ok(map)
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map that hashes keys with `hash_builder`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use ordkit::ds::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32, RandomState> =
    ///     OrderedMap::with_hasher(RandomState::new());
    /// map.push_back("x", 1).unwrap();
    /// assert_eq!(map.get("x"), Ok(&1));
    /// ```
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            index: HashMap::with_hasher(hash_builder),
            entries: Vec::new(),
            #[cfg(feature = "metrics")]
            metrics: OrderedMapMetrics::default(),
        }
    }

    /// Creates an empty map with the given capacity and hasher.
    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            entries: Vec::with_capacity(capacity),
            #[cfg(feature = "metrics")]
            metrics: OrderedMapMetrics::default(),
        }
    }

    /// Returns the number of entries.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.push_back(1, "a").unwrap();
    /// map.push_back(2, "b").unwrap();
    /// assert_eq!(map.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many entries fit without reallocating either structure.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity().min(self.index.capacity())
    }

    /// Returns a reference to the index hasher.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }

    /// Returns the oldest entry, if any.
    #[inline]
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    /// Returns the newest entry (the one `pop_back` would remove), if any.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.back(), None);
    ///
    /// map.push_back("a", 1).unwrap();
    /// map.push_back("b", 2).unwrap();
    /// assert_eq!(map.back(), Some((&"b", &2)));
    /// assert_eq!(map.front(), Some((&"a", &1)));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    /// Returns the newest entry with a mutable value.
    #[inline]
    pub fn back_mut(&mut self) -> Option<(&K, &mut V)> {
        self.entries.last_mut().map(|(k, v)| (&*k, v))
    }

    /// Returns the entry at insertion position `position`.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let map = OrderedMap::try_from_iter([("a", 1), ("b", 2)]).unwrap();
    /// assert_eq!(map.get_index(1), Some((&"b", &2)));
    /// assert_eq!(map.get_index(2), None);
    /// ```
    #[inline]
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
        self.entries.get(position).map(|(k, v)| (k, v))
    }

    /// Returns the entry at insertion position `position` with a mutable value.
    #[inline]
    pub fn get_index_mut(&mut self, position: usize) -> Option<(&K, &mut V)> {
        self.entries.get_mut(position).map(|(k, v)| (&*k, v))
    }

    /// Returns an iterator over entries, oldest first.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let map = OrderedMap::try_from_iter([(3, 'c'), (1, 'a'), (2, 'b')]).unwrap();
    /// let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(pairs, vec![(3, 'c'), (1, 'a'), (2, 'b')]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over entries with mutable values, oldest first.
    ///
    /// Keys are yielded by shared reference; they cannot be changed in place.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::try_from_iter([("a", 1), ("b", 2)]).unwrap();
    /// for (_, v) in map.iter_mut() {
    ///     *v *= 10;
    /// }
    /// assert_eq!(map.get("b"), Ok(&20));
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// Returns an iterator over keys, oldest first.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over values, oldest first.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over mutable values, oldest first.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.entries.iter_mut(),
        }
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Appends `key` and `value` at the tail.
    ///
    /// Fails with [`OrderedMapError::DuplicateKey`] if `key` is already
    /// present; the map is left untouched and the rejected pair is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    /// use ordkit::error::OrderedMapError;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.push_back("Terry", 42), Ok(()));
    /// assert_eq!(map.push_back("Terry", 101), Err(OrderedMapError::DuplicateKey));
    /// assert_eq!(map.get("Terry"), Ok(&42));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn push_back(&mut self, key: K, value: V) -> Result<(), OrderedMapError>
    where
        K: Clone,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_push_call();

        if self.index.contains_key(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_push_duplicate();
            return Err(OrderedMapError::DuplicateKey);
        }

        let position = self.entries.len();
        self.index.insert(key.clone(), position);
        self.entries.push((key, value));

        #[cfg(feature = "metrics")]
        self.metrics.record_push_new();

        debug_assert_eq!(self.index.len(), self.entries.len());
        Ok(())
    }

    /// Removes and returns the most recently inserted entry.
    ///
    /// Fails with [`OrderedMapError::EmptyContainer`] if the map is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    /// use ordkit::error::OrderedMapError;
    ///
    /// let mut map = OrderedMap::new();
    /// map.push_back("a", 1).unwrap();
    /// map.push_back("b", 2).unwrap();
    ///
    /// assert_eq!(map.pop_back(), Ok(("b", 2)));
    /// assert_eq!(map.pop_back(), Ok(("a", 1)));
    /// assert_eq!(map.pop_back(), Err(OrderedMapError::EmptyContainer));
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_back(&mut self) -> Result<(K, V), OrderedMapError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_call();

        let Some((key, value)) = self.entries.pop() else {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_empty();
            return Err(OrderedMapError::EmptyContainer);
        };
        self.index.remove(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_found();

        debug_assert_eq!(self.index.len(), self.entries.len());
        Ok((key, value))
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// Fails with [`OrderedMapError::KeyNotFound`] if `key` is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    /// use ordkit::error::OrderedMapError;
    ///
    /// let mut map = OrderedMap::new();
    /// map.push_back("Gary", 10).unwrap();
    ///
    /// assert_eq!(map.get("Gary"), Ok(&10));
    /// assert_eq!(map.get("Barry"), Err(OrderedMapError::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V, OrderedMapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.index.get(key) {
            Some(&position) => {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_get_hit();
                Ok(&self.entries[position].1)
            }
            None => {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_get_miss();
                Err(OrderedMapError::KeyNotFound)
            }
        }
    }

    /// Returns a mutable handle to the value stored under `key`.
    ///
    /// Writes through the handle are visible to later lookups and iteration.
    /// The handle borrows the map mutably, so it must be dropped before the
    /// next `push_back` or `pop_back`.
    ///
    /// Fails with [`OrderedMapError::KeyNotFound`] if `key` is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.push_back("Terry", 52).unwrap();
    ///
    /// *map.get_mut("Terry").unwrap() = 53;
    /// assert_eq!(map.get("Terry"), Ok(&53));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, OrderedMapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.index.get(key) {
            Some(&position) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_mut_hit();
                Ok(&mut self.entries[position].1)
            }
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_mut_miss();
                Err(OrderedMapError::KeyNotFound)
            }
        }
    }

    /// Returns the stored key and its value.
    ///
    /// Useful when the lookup key is a borrowed form of the stored one.
    /// Counted as a `get` hit or miss when metrics are enabled.
    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V), OrderedMapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.index.get(key) {
            Some(&position) => {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_get_hit();
                let (k, v) = &self.entries[position];
                Ok((k, v))
            }
            None => {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_get_miss();
                Err(OrderedMapError::KeyNotFound)
            }
        }
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_contains_call();

        self.index.contains_key(key)
    }

    /// Returns the insertion position of `key` (0 = oldest).
    ///
    /// Not counted by the metrics `get` counters.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let map = OrderedMap::try_from_iter([("a", 1), ("b", 2), ("c", 3)]).unwrap();
    /// assert_eq!(map.position("c"), Some(2));
    /// assert_eq!(map.position("z"), None);
    /// ```
    #[inline]
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).copied()
    }

    /// Pushes each pair in order, stopping at the first duplicate key.
    ///
    /// All or nothing: on `DuplicateKey` every pair pushed by this call is
    /// popped again, so the map is left as it was before the call.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    /// use ordkit::error::OrderedMapError;
    ///
    /// let mut map = OrderedMap::new();
    /// map.push_back("a", 1).unwrap();
    ///
    /// let res = map.try_extend([("b", 2), ("a", 3), ("c", 4)]);
    /// assert_eq!(res, Err(OrderedMapError::DuplicateKey));
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a"]);
    /// ```
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), OrderedMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Clone,
    {
        let mark = self.len();
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for (key, value) in iter {
            if let Err(err) = self.push_back(key, value) {
                self.truncate_tail(mark);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Drops entries from the tail until `len() == len`.
    ///
    /// Not recorded as pops.
    fn truncate_tail(&mut self, len: usize) {
        while self.entries.len() > len {
            let Some((key, _)) = self.entries.pop() else {
                break;
            };
            self.index.remove(&key);
        }
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.index.reserve(additional);
        self.entries.reserve(additional);
    }

    /// Shrinks both structures as close to `len()` as the allocator allows.
    pub fn shrink_to_fit(&mut self) {
        self.index.shrink_to_fit();
        self.entries.shrink_to_fit();
    }

    /// Checks that the index and entry sequence describe the same entries.
    ///
    /// Verifies equal sizes and that every entry's key is indexed at that
    /// entry's own position. Together these imply unique keys and a gap-free
    /// sequence. Runs in O(n).
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.push_back(1, "one").unwrap();
    /// map.push_back(2, "two").unwrap();
    /// map.pop_back().unwrap();
    /// assert!(map.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but entries holds {}",
                self.index.len(),
                self.entries.len()
            )));
        }
        for (position, (key, _)) in self.entries.iter().enumerate() {
            match self.index.get(key) {
                Some(&indexed) if indexed == position => {}
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "entry at position {position} is indexed at {indexed}"
                    )));
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "entry at position {position} is missing from the index"
                    )));
                }
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("ordered map invariant violated: {err}");
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> OrderedMap<K, V, S> {
    pub fn metrics_snapshot(&self) -> OrderedMapMetricsSnapshot {
        let get_hits = self.metrics.get_hits.get() + self.metrics.get_mut_hits;
        let get_misses = self.metrics.get_misses.get() + self.metrics.get_mut_misses;
        OrderedMapMetricsSnapshot {
            push_calls: self.metrics.push_calls,
            push_new: self.metrics.push_new,
            push_duplicates: self.metrics.push_duplicates,
            pop_calls: self.metrics.pop_calls,
            pop_found: self.metrics.pop_found,
            pop_empty: self.metrics.pop_empty,
            get_calls: get_hits + get_misses,
            get_hits,
            get_misses,
            contains_calls: self.metrics.contains_calls.get(),
            len: self.entries.len(),
            capacity: self.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<OrderedMapMetricsSnapshot> for OrderedMap<K, V, S> {
    fn snapshot(&self) -> OrderedMapMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsReset for OrderedMap<K, V, S> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V, S> Default for OrderedMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

// Entries in insertion order; the index is an implementation detail.
impl<K, V, S> fmt::Debug for OrderedMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ---------------------------------------------------------------------------
// PartialEq, Eq: order-sensitive, hasher-independent
// ---------------------------------------------------------------------------

impl<K, V, S1, S2> PartialEq<OrderedMap<K, V, S2>> for OrderedMap<K, V, S1>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &OrderedMap<K, V, S2>) -> bool {
        self.entries == other.entries
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Eq,
    V: Eq,
{
}

// ---------------------------------------------------------------------------
// Iterator types
// ---------------------------------------------------------------------------

/// Borrowed iterator over the entries of an [`OrderedMap`], oldest first.
///
/// Created by [`OrderedMap::iter`].
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over entries with mutable values, oldest first.
///
/// Created by [`OrderedMap::iter_mut`].
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    inner: std::slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over the entries of an [`OrderedMap`], oldest first.
///
/// Created by calling [`IntoIterator::into_iter`] on an `OrderedMap`.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over the keys of an [`OrderedMap`], oldest first.
pub struct Keys<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over the values of an [`OrderedMap`], oldest first.
pub struct Values<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over mutable values of an [`OrderedMap`], oldest first.
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    inner: std::slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

// ---------------------------------------------------------------------------
// IntoIterator impls
// ---------------------------------------------------------------------------

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the map, yielding owned entries oldest first.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkit::ds::OrderedMap;
    ///
    /// let map = OrderedMap::try_from_iter([("a", 1), ("b", 2)]).unwrap();
    /// let pairs: Vec<_> = map.into_iter().collect();
    /// assert_eq!(pairs, vec![("a", 1), ("b", 2)]);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8, u32),
        Pop,
        Get(u8),
        Bump(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u8..32, any::<u32>()).prop_map(|(k, v)| Op::Push(k, v)),
            2 => Just(Op::Pop),
            1 => (0u8..32).prop_map(Op::Get),
            1 => (0u8..32).prop_map(Op::Bump),
        ]
    }

    // =============================================================================
    // Property Tests - Model Equivalence
    // =============================================================================

    proptest! {
        /// Property: the map behaves like a Vec of pairs with unique keys
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_vec_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut map: OrderedMap<u8, u32> = OrderedMap::new();
            let mut model: Vec<(u8, u32)> = Vec::new();

            for op in ops {
                match op {
                    Op::Push(k, v) => {
                        let res = map.push_back(k, v);
                        if model.iter().any(|(mk, _)| *mk == k) {
                            prop_assert_eq!(res, Err(OrderedMapError::DuplicateKey));
                        } else {
                            prop_assert_eq!(res, Ok(()));
                            model.push((k, v));
                        }
                    }
                    Op::Pop => {
                        let expected = model.pop().ok_or(OrderedMapError::EmptyContainer);
                        prop_assert_eq!(map.pop_back(), expected);
                    }
                    Op::Get(k) => {
                        let expected = model
                            .iter()
                            .find(|(mk, _)| *mk == k)
                            .map(|(_, v)| v)
                            .ok_or(OrderedMapError::KeyNotFound);
                        prop_assert_eq!(map.get(&k), expected);
                    }
                    Op::Bump(k) => {
                        let slot = model.iter_mut().find(|(mk, _)| *mk == k);
                        match (map.get_mut(&k), slot) {
                            (Ok(v), Some((_, mv))) => {
                                *v = v.wrapping_add(1);
                                *mv = mv.wrapping_add(1);
                            }
                            (Err(err), None) => {
                                prop_assert_eq!(err, OrderedMapError::KeyNotFound);
                            }
                            (got, want) => {
                                prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", got, want);
                            }
                        }
                    }
                }

                prop_assert_eq!(map.len(), model.len());
                prop_assert_eq!(map.is_empty(), map.len() == 0);
                let seen: Vec<(u8, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&seen, &model);
                prop_assert!(map.check_invariants().is_ok());
            }
        }

        /// Property: distinct-key pushes iterate back in push order
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_order_preserved(keys in prop::collection::hash_set(any::<u64>(), 0..100)) {
            let keys: Vec<u64> = keys.into_iter().collect();
            let mut map = OrderedMap::new();
            for (i, &k) in keys.iter().enumerate() {
                map.push_back(k, i).unwrap();
            }

            let seen: Vec<(u64, usize)> = map.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<(u64, usize)> =
                keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
            prop_assert_eq!(seen, expected);
        }

        /// Property: a rejected duplicate never changes the stored value
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_duplicate_keeps_first_value(key in any::<u16>(), first in any::<i64>(), second in any::<i64>()) {
            let mut map = OrderedMap::new();
            map.push_back(key, first).unwrap();
            prop_assert_eq!(map.push_back(key, second), Err(OrderedMapError::DuplicateKey));
            prop_assert_eq!(map.get(&key), Ok(&first));
            prop_assert_eq!(map.len(), 1);
        }

        /// Property: pop_back removes exactly the newest entry
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_pop_removes_newest_only(keys in prop::collection::hash_set(any::<u32>(), 1..60)) {
            let mut map = OrderedMap::new();
            for &k in &keys {
                map.push_back(k, k).unwrap();
            }
            let before: Vec<u32> = map.keys().copied().collect();

            let (popped, _) = map.pop_back().unwrap();
            prop_assert_eq!(Some(&popped), before.last());

            let after: Vec<u32> = map.keys().copied().collect();
            prop_assert_eq!(after.as_slice(), &before[..before.len() - 1]);
            prop_assert!(!map.contains_key(&popped));
        }
    }
}
