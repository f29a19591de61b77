//! Hash map store.
//!
//! ## Architecture
//! - Entries are kept in an `FxHashMap<K, V>`; values are owned by the store.
//! - The store is unbounded. Capacity is enforced by the policy that owns it.
//! - Hit/miss/insert/update/remove counters use `Cell<u64>` so that `get`
//!   can record through `&self`. They are always present, which makes the
//!   store (and any cache built on it) `Send` but not `Sync`.
//!
//! ## Core Operations
//! - `insert`: insert or update by key.
//! - `get`: fetch by key (updates hit/miss counters).
//! - `peek`: fetch by key without touching counters.
//! - `get_or_insert`: return the stored value, inserting one if absent.
//! - `remove` / `clear`.
//!
//! ## Example Usage
//! ```rust
//! use chainkit::store::hashmap::HashMapStore;
//! use chainkit::store::traits::{StoreCore, StoreMut};
//!
//! let mut store: HashMapStore<u64, String> = HashMapStore::new();
//! store.insert(1, "a".to_string());
//! assert!(store.contains(&1));
//! assert_eq!(store.get_or_insert(2, "b".to_string()), "b");
//! assert_eq!(store.get_or_insert(2, "c".to_string()), "b");
//! ```
use std::cell::Cell;
use std::collections::hash_map::Entry;
use std::convert::Infallible;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::store::traits::{StoreCore, StoreMetrics, StoreMut};

#[derive(Debug, Default)]
struct StoreCounters {
    hits: Cell<u64>,
    misses: Cell<u64>,
    inserts: Cell<u64>,
    updates: Cell<u64>,
    removes: Cell<u64>,
}

impl StoreCounters {
    fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits.get(),
            misses: self.misses.get(),
            inserts: self.inserts.get(),
            updates: self.updates.get(),
            removes: self.removes.get(),
        }
    }

    #[inline]
    fn bump(cell: &Cell<u64>) {
        cell.set(cell.get() + 1);
    }
}

/// Single-threaded `FxHashMap`-backed store.
#[derive(Debug)]
pub struct HashMapStore<K, V> {
    map: FxHashMap<K, V>,
    counters: StoreCounters,
}

impl<K, V> HashMapStore<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            counters: StoreCounters::default(),
        }
    }

    /// Create a store with room for `capacity` entries before rehashing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            counters: StoreCounters::default(),
        }
    }

    /// Fetch a value by key without updating counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Return the value under `key`, storing `value` first if the key is absent.
    pub fn get_or_insert(&mut self, key: K, value: V) -> &V {
        self.get_or_insert_with(key, || value)
    }

    /// Return the value under `key`, storing `make()` first if the key is absent.
    ///
    /// `make` is only called on a miss.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &V {
        match self.try_get_or_insert_with(key, || Ok::<V, Infallible>(make())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible [`get_or_insert_with`](Self::get_or_insert_with): an `Err`
    /// from `make` leaves the store unchanged.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        key: K,
        make: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        match self.map.entry(key) {
            Entry::Occupied(entry) => {
                StoreCounters::bump(&self.counters.hits);
                Ok(entry.into_mut())
            },
            Entry::Vacant(entry) => {
                StoreCounters::bump(&self.counters.misses);
                let value = make()?;
                StoreCounters::bump(&self.counters.inserts);
                Ok(entry.insert(value))
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }

    /// Return the backing hash map capacity.
    pub fn map_capacity(&self) -> usize {
        self.map.capacity()
    }
}

impl<K: Eq + Hash, V> Default for HashMapStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> StoreCore<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn get(&self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(value) => {
                StoreCounters::bump(&self.counters.hits);
                Some(value)
            },
            None => {
                StoreCounters::bump(&self.counters.misses);
                None
            },
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }
}

impl<K, V> StoreMut<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.map.insert(key, value);
        if previous.is_some() {
            StoreCounters::bump(&self.counters.updates);
        } else {
            StoreCounters::bump(&self.counters.inserts);
        }
        previous
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            StoreCounters::bump(&self.counters.removes);
        }
        removed
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
