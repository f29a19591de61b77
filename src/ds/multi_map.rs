//! Maps from a key to a collection of values.
//!
//! - [`MultiMap`] keeps every value in insertion order (duplicates allowed).
//! - [`SetMultiMap`] keeps distinct values per key.
//!
//! In both maps a key is present only while it has at least one value:
//! removing the last value removes the key.
use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ds::list::List;

/// Key → ordered list of values.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    map: FxHashMap<K, List<V>>,
}

impl<K, V> MultiMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Appends `value` to the values of `key`.
    pub fn insert(&mut self, key: K, value: V) {
        self.map.entry(key).or_default().add(value);
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&List<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Removes `key` and all of its values.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<List<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.remove(key)
    }

    /// Removes the first occurrence of `value` under `key`.
    pub fn remove_value<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: PartialEq,
    {
        let Some(values) = self.map.get_mut(key) else {
            return false;
        };
        let removed = values.remove(value).is_some();
        if values.is_empty() {
            self.map.remove(key);
        }
        removed
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &List<V>)> {
        self.map.iter()
    }
}

impl<K: Eq + Hash, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Key → set of distinct values.
#[derive(Debug, Clone)]
pub struct SetMultiMap<K, V> {
    map: FxHashMap<K, FxHashSet<V>>,
}

impl<K, V> SetMultiMap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Adds `value` under `key`. Returns `false` if it was already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.map.entry(key).or_default().insert(value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&FxHashSet<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn has_value<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key).is_some_and(|values| values.contains(value))
    }

    /// First value under `key` matching `predicate`. Set order is unspecified.
    pub fn find<Q>(&self, key: &Q, mut predicate: impl FnMut(&V) -> bool) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key)?.iter().find(|v| predicate(v))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<FxHashSet<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.remove(key)
    }

    /// Removes `value` under `key`, or the whole key when `value` is `None`.
    ///
    /// Returns `true` if something was removed.
    pub fn remove_value<Q>(&mut self, key: &Q, value: Option<&V>) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(value) = value else {
            return self.map.remove(key).is_some();
        };
        let Some(values) = self.map.get_mut(key) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.map.remove(key);
        }
        removed
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &FxHashSet<V>)> {
        self.map.iter()
    }
}

impl<K: Eq + Hash, V: Eq + Hash> Default for SetMultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
