//! Insertion-ordered hash map backed by a doubly linked chain.
//!
//! Entries live in a [`SlotArena`] of [`KeyedNode`]s; an `FxHashMap<K, SlotId>`
//! index gives O(1) lookup and O(1) relinking to either end.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          chain (front → back)
//!   ┌───────────┬────────┐
//!   │  "a"      │ id_0   │──────►  [a:1] ◄──► [b:2] ◄──► [c:3]
//!   │  "b"      │ id_1   │──────────────────►  ▲
//!   │  "c"      │ id_2   │─────────────────────────────────┘
//!   └───────────┴────────┘
//! ```
//!
//! | Operation        | Time | Notes                               |
//! |------------------|------|-------------------------------------|
//! | `insert`         | O(1) | updates move the entry to the back  |
//! | `push_front`     | O(1) | inserts or moves to the front       |
//! | `get`            | O(1) | does not reorder                    |
//! | `move_to_front`  | O(1) |                                     |
//! | `pop_front/back` | O(1) |                                     |
//! | `remove`         | O(1) |                                     |
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::ds::LinkedMap;
//!
//! let mut map = LinkedMap::new();
//! map.insert("a", 1);
//! map.insert("b", 2);
//! map.insert("a", 10);
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! assert_eq!(map.pop_front(), Some(("b", 2)));
//! ```
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::node::{Endpoints, KeyedNode};
use crate::ds::slot_arena::{SlotArena, SlotId};

/// Hash map that remembers the order entries were linked in.
pub struct LinkedMap<K, V> {
    index: FxHashMap<K, SlotId>,
    arena: SlotArena<KeyedNode<K, V>>,
    ends: Endpoints,
}

impl<K, V> LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            arena: SlotArena::new(),
            ends: Endpoints::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            arena: SlotArena::with_capacity(capacity),
            ends: Endpoints::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(KeyedNode::value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.arena.get_mut(id).map(KeyedNode::value_mut)
    }

    /// Inserts or updates `key`, leaving the entry at the back.
    ///
    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.push_back(key, value)
    }

    /// Inserts or updates `key`, leaving the entry at the front.
    pub fn push_front(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let old = self.arena.get_mut(id).map(|node| node.set_value(value));
            self.ends.unlink(&mut self.arena, id);
            self.ends.link_front(&mut self.arena, id);
            return old;
        }
        let id = self.arena.insert(KeyedNode::new(key.clone(), value));
        self.ends.link_front(&mut self.arena, id);
        self.index.insert(key, id);
        None
    }

    /// Inserts or updates `key`, leaving the entry at the back.
    pub fn push_back(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let old = self.arena.get_mut(id).map(|node| node.set_value(value));
            self.ends.unlink(&mut self.arena, id);
            self.ends.link_back(&mut self.arena, id);
            return old;
        }
        let id = self.arena.insert(KeyedNode::new(key.clone(), value));
        self.ends.link_back(&mut self.arena, id);
        self.index.insert(key, id);
        None
    }

    /// Moves `key` to the front. Returns `false` if the key is absent.
    pub fn move_to_front(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.ends.head == Some(id) {
            return true;
        }
        self.ends.unlink(&mut self.arena, id) && self.ends.link_front(&mut self.arena, id)
    }

    /// Moves `key` to the back. Returns `false` if the key is absent.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.ends.tail == Some(id) {
            return true;
        }
        self.ends.unlink(&mut self.arena, id) && self.ends.link_back(&mut self.arena, id)
    }

    pub fn front(&self) -> Option<(&K, &V)> {
        let node = self.arena.get(self.ends.head?)?;
        Some((node.key(), node.value()))
    }

    pub fn back(&self) -> Option<(&K, &V)> {
        let node = self.arena.get(self.ends.tail?)?;
        Some((node.key(), node.value()))
    }

    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let id = self.ends.head?;
        self.take(id)
    }

    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let id = self.ends.tail?;
        self.take(id)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = *self.index.get(key)?;
        self.take(id).map(|(_, value)| value)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.arena.clear();
        self.ends.reset();
    }

    /// Iterates entries front to back.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let mut cursor = self.ends.head;
        std::iter::from_fn(move || {
            let node = self.arena.get(cursor?)?;
            cursor = node.next();
            Some((node.key(), node.value()))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    fn take(&mut self, id: SlotId) -> Option<(K, V)> {
        self.ends.unlink(&mut self.arena, id);
        let (key, value) = self.arena.remove(id)?.into_parts();
        self.index.remove(&key);
        Some((key, value))
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.arena.len());
        let mut count = 0usize;
        let mut prev = None;
        let mut cursor = self.ends.head;
        while let Some(id) = cursor {
            let node = self.arena.get(id).expect("linked id must be live");
            assert_eq!(node.previous(), prev);
            assert_eq!(self.index.get(node.key()), Some(&id));
            count += 1;
            prev = Some(id);
            cursor = node.next();
        }
        assert_eq!(prev, self.ends.tail);
        assert_eq!(count, self.index.len());
    }
}

impl<K, V> Default for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for LinkedMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for LinkedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
