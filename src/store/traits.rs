//! Storage backends for keyed values.
//!
//! Stores own keys and values and answer lookups; ordering and eviction live
//! in the policy layer. [`EvictingCache`](crate::policy::evicting::EvictingCache)
//! keeps its values in a store and its recency order in a linked list.

/// Snapshot of store-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
}

/// Read-only store operations.
pub trait StoreCore<K, V> {
    /// Fetch a value by key.
    fn get(&self, key: &K) -> Option<&V>;

    /// Check if a key exists.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the store's current counters.
    fn metrics(&self) -> StoreMetrics {
        StoreMetrics::default()
    }
}

/// Mutating store operations.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Insert or update a value. Returns the previous value if present.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Mutable access to a stored value.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Remove a value by key.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Remove all entries.
    fn clear(&mut self);
}
