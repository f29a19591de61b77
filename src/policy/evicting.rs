//! Fixed-capacity least-recently-used (LRU) evicting cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         EvictingCache<K, V>                          │
//!   │                                                                      │
//!   │   store: HashMapStore<K, V>          index: FxHashMap<K, SlotId>     │
//!   │   ┌──────────┬─────────┐             ┌──────────┬─────────┐          │
//!   │   │   key    │  value  │             │   key    │ SlotId  │──┐       │
//!   │   └──────────┴─────────┘             └──────────┴─────────┘  │       │
//!   │                                                              │       │
//!   │   recency: DoublyLinkedList<K>                               ▼       │
//!   │   head (MRU) ─► [k3] ◄──► [k1] ◄──► [k2] ◄── tail (LRU)              │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store owns the values, the recency list orders the keys, and the index
//! maps every key to its node so that refreshing recency never scans the list.
//! After every public call `store.len() == recency.len() == index.len()` and
//! the length is at most `capacity`.
//!
//! ## Operations
//!
//! | Operation      | Time   | Recency effect                         |
//! |----------------|--------|----------------------------------------|
//! | `get`          | O(1)   | hit moves the key to the front         |
//! | `peek`, `has`  | O(1)   | none                                   |
//! | `put`          | O(1)   | key moves to / is inserted at front    |
//! | `get_or_put`   | O(1)   | as `get`, or as `put` on a miss        |
//! | `evict`        | O(1)   | removes the tail                       |
//! | `remove`       | O(1)   | unlinks the key                        |
//! | `touch`        | O(1)   | moves the key to the front             |
//! | `recency_rank` | O(n)   | none                                   |
//!
//! ## Presence
//!
//! A stored value is a hit regardless of what it is: `0`, `""`, `false` and
//! `None` values are returned by [`get`](EvictingCache::get) like any other.
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::policy::evicting::EvictingCache;
//!
//! let mut cache = EvictingCache::new(2);
//! cache.put("k1", 1);
//! cache.put("k2", 2);
//! cache.get(&"k1");
//! cache.put("k3", 3);
//!
//! assert_eq!(cache.get(&"k2"), None);
//! assert_eq!(cache.get(&"k1"), Some(&1));
//! assert_eq!(cache.get(&"k3"), Some(&3));
//! ```
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::doubly_linked_list::DoublyLinkedList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::EvictingMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::EvictingMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, EvictingMetricsReadRecorder, EvictingMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Bounded key-value cache that evicts the least recently used entry.
pub struct EvictingCache<K, V> {
    store: HashMapStore<K, V>,
    recency: DoublyLinkedList<K>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: EvictingMetrics,
}

impl<K, V> EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a cache holding at most `capacity` entries, rejecting zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_reserved(capacity, 0)
    }

    /// Creates a cache and reserves room for `reserve` entries up front.
    pub(crate) fn with_reserved(capacity: usize, reserve: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        let reserve = reserve.min(capacity);
        Ok(Self {
            store: HashMapStore::with_capacity(reserve),
            recency: DoublyLinkedList::with_capacity(reserve),
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: EvictingMetrics::default(),
        })
    }

    /// Maximum number of entries. Fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Presence check. Does not change recency.
    pub fn has(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Alias of [`has`](Self::has).
    pub fn contains(&self, key: &K) -> bool {
        self.has(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss has no side effects.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        self.recency.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.store.get(key)
    }

    /// Returns the value for `key` without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let value = self.store.peek(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some(value)
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// An update returns the previous value and never evicts. A new key that
    /// takes the cache over capacity evicts exactly one entry, the least
    /// recently used one.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            let previous = self.store.insert(key, value);
            self.recency.move_to_front(id);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return previous;
        }

        let id = self.recency.push_front(key.clone());
        self.index.insert(key.clone(), id);
        self.store.insert(key, value);

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.len() > self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }
        None
    }

    /// Returns the value for `key`, calling `producer` to create it on a miss.
    ///
    /// `producer` runs at most once and never on a hit.
    ///
    /// ```
    /// use chainkit::policy::evicting::EvictingCache;
    ///
    /// let mut cache = EvictingCache::new(4);
    /// assert_eq!(*cache.get_or_put("answer", || 42), 42);
    /// assert_eq!(*cache.get_or_put("answer", || unreachable!()), 42);
    /// ```
    pub fn get_or_put(&mut self, key: K, producer: impl FnOnce() -> V) -> &V {
        match self.try_get_or_put(key, || Ok::<V, Infallible>(producer())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible [`get_or_put`](Self::get_or_put).
    ///
    /// If `producer` fails the error is returned and the cache is left as it
    /// was, with nothing evicted.
    pub fn try_get_or_put<E>(
        &mut self,
        key: K,
        producer: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        #[cfg(feature = "metrics")]
        self.metrics.record_get_or_put_call();

        if let Some(&id) = self.index.get(&key) {
            self.recency.move_to_front(id);

            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();

            return self.store.try_get_or_insert_with(key, producer);
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_get_miss();
            self.metrics.record_producer_call();
        }

        let value = producer()?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_call();
            self.metrics.record_insert_new();
        }

        // The new key becomes the head, so making room first evicts the same
        // entry `put` would evict afterwards.
        if self.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        let id = self.recency.push_front(key.clone());
        self.index.insert(key.clone(), id);
        Ok(self.store.get_or_insert(key, value))
    }

    /// Removes the least recently used entry.
    ///
    /// Returns `false`, with no effect, when the cache is empty.
    pub fn evict(&mut self) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let evicted = self.evict_lru().is_some();

        #[cfg(feature = "metrics")]
        if evicted {
            self.metrics.record_evicted_entry();
        }

        evicted
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        self.recency.remove_node(id);
        let value = self.store.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.evict_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(entry)
    }

    /// The entry `evict` would remove next.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let key = self.recency.back()?;
        let value = self.store.peek(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((key, value))
    }

    /// Marks `key` most recently used without reading it.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.recency.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Position of `key` in recency order (0 = most recently used).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let &target = self.index.get(key)?;
        for (rank, (id, _)) in self.recency.iter_entries().enumerate() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    /// Empties the cache. Capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.store.clear();
        self.recency.clear();
        self.index.clear();
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.recency
            .iter()
            .filter_map(|key| self.store.peek(key).map(|value| (key, value)))
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.recency.iter()
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let key = self.recency.pop_back()?;
        self.index.remove(&key);
        let value = self.store.remove(&key)?;
        Some((key, value))
    }

    /// Verifies that the store, recency list and index agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let (store_len, list_len, index_len) =
            (self.store.len(), self.recency.len(), self.index.len());
        if store_len != list_len || list_len != index_len {
            return Err(InvariantError::new(format!(
                "size mismatch: store {store_len}, recency {list_len}, index {index_len}"
            )));
        }
        if index_len > self.capacity {
            return Err(InvariantError::new(format!(
                "len {index_len} exceeds capacity {}",
                self.capacity
            )));
        }
        self.recency.check_invariants()?;
        for (rank, (id, key)) in self.recency.iter_entries().enumerate() {
            if self.index.get(key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index entry for recency rank {rank} does not point at its node"
                )));
            }
            if !self.store.contains(key) {
                return Err(InvariantError::new(format!(
                    "key at recency rank {rank} has no stored value"
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("evicting cache invariant violated: {err}");
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> EvictingMetricsSnapshot {
        EvictingMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            get_or_put_calls: self.metrics.get_or_put_calls,
            producer_calls: self.metrics.producer_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<EvictingMetricsSnapshot> for EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> EvictingMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        EvictingCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        self.has(key)
    }

    fn len(&self) -> usize {
        EvictingCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        EvictingCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        EvictingCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        EvictingCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        EvictingCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        EvictingCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        EvictingCache::recency_rank(self, key)
    }
}

impl<K, V> Extend<(K, V)> for EvictingCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for EvictingCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictingCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V>(&'a EvictingCache<K, V>);

impl<K, V> fmt::Debug for DebugEntries<'_, K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(cache: &EvictingCache<&'static str, V>) -> Vec<&'static str> {
        cache.keys().copied().collect()
    }

    // ==============================================
    // Construction
    // ==============================================

    mod construction {
        use super::*;

        #[test]
        fn cache_can_move_between_threads() {
            fn assert_send<T: Send>() {}
            assert_send::<EvictingCache<String, Vec<u8>>>();

            let mut cache = EvictingCache::new(2);
            cache.put(1u32, "one".to_string());
            let handle = std::thread::spawn(move || {
                cache.put(2, "two".to_string());
                cache
            });
            let cache = handle.join().unwrap();
            assert_eq!(cache.peek(&2), Some(&"two".to_string()));
        }

        #[test]
        fn zero_capacity_is_rejected() {
            let err = EvictingCache::<u32, u32>::try_new(0).unwrap_err();
            assert_eq!(err.message(), "capacity must be greater than zero");
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than zero")]
        fn new_panics_on_zero_capacity() {
            let _ = EvictingCache::<u32, u32>::new(0);
        }

        #[test]
        fn new_cache_is_empty() {
            let cache: EvictingCache<u32, u32> = EvictingCache::new(3);
            assert_eq!(cache.capacity(), 3);
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.size(), 0);
            assert!(cache.is_empty());
            cache.debug_validate_invariants();
        }
    }

    // ==============================================
    // Reference scenarios
    // ==============================================

    mod scenarios {
        use super::*;

        #[test]
        fn refreshed_key_survives_eviction() {
            let mut cache = EvictingCache::new(2);
            cache.put("k1", "v1");
            cache.put("k2", "v2");
            assert_eq!(cache.get(&"k1"), Some(&"v1"));
            cache.put("k3", "v3");

            assert_eq!(cache.get(&"k2"), None);
            assert_eq!(cache.get(&"k1"), Some(&"v1"));
            assert_eq!(cache.get(&"k3"), Some(&"v3"));
            cache.debug_validate_invariants();
        }

        #[test]
        fn untouched_keys_evict_in_insertion_order() {
            let mut cache = EvictingCache::new(2);
            cache.put("k1", "v1");
            cache.put("k2", "v2");
            cache.put("k3", "v3");

            assert_eq!(cache.get(&"k1"), None);
            assert_eq!(cache.get(&"k2"), Some(&"v2"));
            assert_eq!(cache.get(&"k3"), Some(&"v3"));
        }

        #[test]
        fn evict_on_empty_cache_is_false() {
            let mut cache: EvictingCache<&str, i32> = EvictingCache::new(4);
            assert!(!cache.evict());
            assert!(cache.is_empty());
            cache.debug_validate_invariants();
        }

        #[test]
        fn update_at_capacity_one_does_not_evict() {
            let mut cache = EvictingCache::new(1);
            assert_eq!(cache.put("k1", "v1"), None);
            assert_eq!(cache.put("k1", "v2"), Some("v1"));
            assert_eq!(cache.get(&"k1"), Some(&"v2"));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn get_or_put_runs_producer_only_on_miss() {
            let mut cache = EvictingCache::new(2);
            let mut first_calls = 0;
            let value = *cache.get_or_put("k1", || {
                first_calls += 1;
                "made"
            });
            assert_eq!(value, "made");
            assert_eq!(first_calls, 1);

            let mut second_calls = 0;
            let value = *cache.get_or_put("k1", || {
                second_calls += 1;
                "other"
            });
            assert_eq!(value, "made");
            assert_eq!(second_calls, 0);
            assert_eq!(cache.len(), 1);
        }
    }

    // ==============================================
    // Presence semantics
    // ==============================================

    mod presence {
        use super::*;

        #[test]
        fn falsy_values_are_hits() {
            let mut ints = EvictingCache::new(2);
            ints.put("zero", 0);
            assert_eq!(ints.get(&"zero"), Some(&0));

            let mut strings = EvictingCache::new(2);
            strings.put("empty", String::new());
            assert_eq!(strings.get(&"empty"), Some(&String::new()));

            let mut bools = EvictingCache::new(2);
            bools.put("no", false);
            assert_eq!(bools.get(&"no"), Some(&false));

            let mut options: EvictingCache<&str, Option<u8>> = EvictingCache::new(2);
            options.put("none", None);
            assert_eq!(options.get(&"none"), Some(&None));
            assert_eq!(options.get(&"absent"), None);
        }

        #[test]
        fn falsy_value_is_not_reproduced_by_get_or_put() {
            let mut cache = EvictingCache::new(2);
            cache.put("zero", 0);
            assert_eq!(*cache.get_or_put("zero", || 99), 0);
        }

        #[test]
        fn has_and_peek_do_not_touch_recency() {
            let mut cache = EvictingCache::new(2);
            cache.put("a", 1);
            cache.put("b", 2);
            assert!(cache.has(&"a"));
            assert!(cache.contains(&"a"));
            assert_eq!(cache.peek(&"a"), Some(&1));
            cache.put("c", 3);

            assert!(!cache.has(&"a"));
            assert_eq!(keys(&cache), vec!["c", "b"]);
        }

        #[test]
        fn repeated_get_is_idempotent() {
            let mut cache = EvictingCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            assert_eq!(cache.get(&"b"), Some(&2));
            let after_first = keys(&cache);
            assert_eq!(cache.get(&"b"), Some(&2));
            assert_eq!(keys(&cache), after_first);
            assert_eq!(after_first, vec!["b", "c", "a"]);
        }

        #[test]
        fn miss_has_no_side_effects() {
            let mut cache = EvictingCache::new(2);
            cache.put("a", 1);
            cache.put("b", 2);
            assert_eq!(cache.get(&"z"), None);
            assert_eq!(keys(&cache), vec!["b", "a"]);
        }
    }

    // ==============================================
    // Recency operations
    // ==============================================

    mod recency {
        use super::*;

        #[test]
        fn update_moves_key_to_front() {
            let mut cache = EvictingCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            cache.put("a", 10);
            assert_eq!(keys(&cache), vec!["a", "c", "b"]);
            cache.put("d", 4);
            assert!(!cache.has(&"b"));
            cache.debug_validate_invariants();
        }

        #[test]
        fn pop_and_peek_lru() {
            let mut cache = EvictingCache::new(3);
            cache.extend([("a", 1), ("b", 2)]);
            assert_eq!(cache.peek_lru(), Some((&"a", &1)));
            assert_eq!(cache.pop_lru(), Some(("a", 1)));
            assert_eq!(cache.pop_lru(), Some(("b", 2)));
            assert_eq!(cache.pop_lru(), None);
            assert_eq!(cache.peek_lru(), None);
        }

        #[test]
        fn touch_and_rank() {
            let mut cache = EvictingCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            assert_eq!(cache.recency_rank(&"c"), Some(0));
            assert_eq!(cache.recency_rank(&"a"), Some(2));
            assert!(cache.touch(&"a"));
            assert_eq!(cache.recency_rank(&"a"), Some(0));
            assert_eq!(cache.peek_lru(), Some((&"b", &2)));
            assert!(!cache.touch(&"z"));
            assert_eq!(cache.recency_rank(&"z"), None);
        }

        #[test]
        fn remove_unlinks_key() {
            let mut cache = EvictingCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            assert_eq!(cache.remove(&"b"), Some(2));
            assert_eq!(cache.remove(&"b"), None);
            assert_eq!(keys(&cache), vec!["c", "a"]);
            cache.put("d", 4);
            cache.put("e", 5);
            assert_eq!(keys(&cache), vec!["e", "d", "c"]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn iter_runs_mru_to_lru() {
            let mut cache = EvictingCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            cache.get(&"a");
            let entries: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(entries, vec![("a", 1), ("c", 3), ("b", 2)]);
        }

        #[test]
        fn clear_keeps_capacity() {
            let mut cache = EvictingCache::new(2);
            cache.extend([("a", 1), ("b", 2)]);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 2);
            assert!(!cache.evict());
            cache.put("c", 3);
            assert_eq!(keys(&cache), vec!["c"]);
            cache.debug_validate_invariants();
        }
    }

    // ==============================================
    // Fallible get_or_put
    // ==============================================

    mod fallible {
        use super::*;

        #[test]
        fn failed_producer_leaves_cache_unchanged() {
            let mut cache = EvictingCache::new(2);
            cache.extend([("a", 1), ("b", 2)]);
            let result = cache.try_get_or_put("c", || Err::<i32, _>("unavailable"));
            assert_eq!(result, Err("unavailable"));
            assert_eq!(keys(&cache), vec!["b", "a"]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn successful_producer_evicts_lru_when_full() {
            let mut cache = EvictingCache::new(2);
            cache.extend([("a", 1), ("b", 2)]);
            assert_eq!(cache.try_get_or_put("c", || Ok::<_, ()>(3)), Ok(&3));
            assert_eq!(keys(&cache), vec!["c", "b"]);
            assert_eq!(cache.try_get_or_put("b", || Err("unused")), Ok(&2));
            assert_eq!(keys(&cache), vec!["b", "c"]);
            cache.debug_validate_invariants();
        }
    }

    #[test]
    fn trait_surface_delegates() {
        fn fill<C: CoreCache<u32, u32>>(cache: &mut C) {
            for i in 0..5 {
                cache.insert(i, i * 10);
            }
        }

        let mut cache = EvictingCache::new(3);
        fill(&mut cache);
        assert_eq!(CoreCache::len(&cache), 3);
        assert_eq!(CoreCache::capacity(&cache), 3);
        assert!(!CoreCache::contains(&cache, &0));
        assert_eq!(CoreCache::get(&mut cache, &2), Some(&20));
        assert_eq!(MutableCache::remove_batch(&mut cache, &[3, 9]), vec![Some(30), None]);
        assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&4, &40)));
        assert_eq!(LruCacheTrait::pop_lru(&mut cache), Some((4, 40)));
        CoreCache::clear(&mut cache);
        assert!(CoreCache::is_empty(&cache));
    }

    #[test]
    fn debug_lists_entries_in_recency_order() {
        let mut cache = EvictingCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        let text = format!("{:?}", cache);
        assert_eq!(
            text,
            r#"EvictingCache { len: 2, capacity: 2, entries: [(2, "two"), (1, "one")] }"#
        );
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_cache_activity() {
        let mut cache = EvictingCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"z");
        cache.put("c", 3);
        cache.get_or_put("d", || 4);
        cache.peek(&"d");
        cache.recency_rank(&"c");

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 2);
        assert_eq!(snap.insert_new, 4);
        assert_eq!(snap.evicted_entries, 2);
        assert_eq!(snap.producer_calls, 1);
        assert_eq!(snap.peek_found, 1);
        assert_eq!(snap.recency_rank_scan_steps, 2);
        assert_eq!(snap.cache_len, 2);

        cache.reset_metrics();
        assert_eq!(cache.metrics_snapshot().get_calls, 0);
    }

    // ==============================================
    // Property tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u8, u16),
            Get(u8),
            GetOrPut(u8, u16),
            Evict,
            Remove(u8),
            Touch(u8),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0u8..16, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
                4 => (0u8..16).prop_map(Op::Get),
                2 => (0u8..16, any::<u16>()).prop_map(|(k, v)| Op::GetOrPut(k, v)),
                1 => Just(Op::Evict),
                1 => (0u8..16).prop_map(Op::Remove),
                1 => (0u8..16).prop_map(Op::Touch),
                1 => Just(Op::Clear),
            ]
        }

        /// Reference LRU: front of the Vec is most recently used.
        #[derive(Default)]
        struct Model {
            entries: Vec<(u8, u16)>,
        }

        impl Model {
            fn position(&self, key: u8) -> Option<usize> {
                self.entries.iter().position(|(k, _)| *k == key)
            }

            fn refresh(&mut self, key: u8) -> Option<u16> {
                let pos = self.position(key)?;
                let entry = self.entries.remove(pos);
                self.entries.insert(0, entry);
                Some(entry.1)
            }

            fn put(&mut self, key: u8, value: u16, capacity: usize) {
                if let Some(pos) = self.position(key) {
                    self.entries.remove(pos);
                }
                self.entries.insert(0, (key, value));
                if self.entries.len() > capacity {
                    self.entries.pop();
                }
            }
        }

        proptest! {
            /// Property: the cache behaves like a reference LRU under any op sequence
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                capacity in 1usize..8,
                ops in prop::collection::vec(op(), 0..200)
            ) {
                let mut cache = EvictingCache::new(capacity);
                let mut model = Model::default();

                for op in ops {
                    match op {
                        Op::Put(k, v) => {
                            cache.put(k, v);
                            model.put(k, v, capacity);
                        },
                        Op::Get(k) => {
                            prop_assert_eq!(cache.get(&k).copied(), model.refresh(k));
                        },
                        Op::GetOrPut(k, v) => {
                            let expected = match model.refresh(k) {
                                Some(existing) => existing,
                                None => {
                                    model.put(k, v, capacity);
                                    v
                                },
                            };
                            prop_assert_eq!(*cache.get_or_put(k, || v), expected);
                        },
                        Op::Evict => {
                            prop_assert_eq!(cache.evict(), model.entries.pop().is_some());
                        },
                        Op::Remove(k) => {
                            let expected = model.position(k).map(|pos| model.entries.remove(pos).1);
                            prop_assert_eq!(cache.remove(&k), expected);
                        },
                        Op::Touch(k) => {
                            prop_assert_eq!(cache.touch(&k), model.refresh(k).is_some());
                        },
                        Op::Clear => {
                            cache.clear();
                            model.entries.clear();
                        },
                    }

                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                    let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(actual, model.entries.clone());
                }
            }

            /// Property: the next eviction always removes the least recently touched key
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_evicts_least_recently_touched(
                capacity in 1usize..6,
                touches in prop::collection::vec(0u8..10, 1..60)
            ) {
                let mut cache = EvictingCache::new(capacity);
                let mut last_touch = std::collections::HashMap::new();

                for (step, key) in touches.into_iter().enumerate() {
                    if cache.get(&key).is_none() {
                        cache.put(key, ());
                    }
                    last_touch.insert(key, step);
                }

                let oldest = cache
                    .keys()
                    .min_by_key(|k| last_touch[*k])
                    .copied();
                prop_assert_eq!(cache.pop_lru().map(|(k, _)| k), oldest);
            }
        }
    }
}
