//! # Cache Trait Hierarchy
//!
//! Caches expose their operations through a small trait hierarchy so that
//! callers can be written against the capability they need rather than a
//! concrete type.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────────────────────────┐
//!              │            CoreCache<K, V>              │
//!              │                                         │
//!              │  insert(&mut, K, V) → Option<V>         │
//!              │  get(&mut, &K) → Option<&V>             │
//!              │  contains(&, &K) → bool                 │
//!              │  len(&) → usize                         │
//!              │  is_empty(&) → bool                     │
//!              │  capacity(&) → usize                    │
//!              │  clear(&mut)                            │
//!              └────────────────────┬────────────────────┘
//!                                   │
//!                                   ▼
//!              ┌─────────────────────────────────────────┐
//!              │          MutableCache<K, V>             │
//!              │                                         │
//!              │  remove(&K) → Option<V>                 │
//!              │  remove_batch(&[K])                     │
//!              └────────────────────┬────────────────────┘
//!                                   │
//!                                   ▼
//!              ┌─────────────────────────────────────────┐
//!              │          LruCacheTrait<K, V>            │
//!              │                                         │
//!              │  pop_lru() → (K, V)                     │
//!              │  peek_lru() → (&K, &V)                  │
//!              │  touch(&K) → bool                       │
//!              │  recency_rank(&K) → usize               │
//!              └─────────────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait           | Extends        | Purpose                            |
//! |-----------------|----------------|------------------------------------|
//! | `CoreCache`     | -              | Universal cache operations         |
//! | `MutableCache`  | `CoreCache`    | Adds arbitrary key removal         |
//! | `LruCacheTrait` | `MutableCache` | LRU-specific with recency tracking |
//!
//! ## Thread Safety
//!
//! Cache implementations in this crate are single-threaded. Wrap a cache in a
//! lock held for the whole of each operation if it must be shared.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use chainkit::traits::CoreCache;
/// use chainkit::policy::evicting::EvictingCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = EvictingCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// cache's eviction policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction order. Use [`contains`](Self::contains) to check
    /// existence without affecting it.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use chainkit::traits::{CoreCache, MutableCache};
/// use chainkit::policy::evicting::EvictingCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = EvictingCache::new(100);
/// cache.put(1, "one".to_string());
/// cache.put(2, "two".to_string());
/// cache.put(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.has(&1));
/// assert!(cache.has(&2));
/// assert!(!cache.has(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    ///
    /// ```
    /// use chainkit::traits::MutableCache;
    /// use chainkit::policy::evicting::EvictingCache;
    ///
    /// let mut cache = EvictingCache::new(10);
    /// cache.put(1, "one");
    /// cache.put(2, "two");
    /// cache.put(3, "three");
    ///
    /// let removed = cache.remove_batch(&[1, 99, 3]);
    /// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// # Example
///
/// ```
/// use chainkit::traits::LruCacheTrait;
/// use chainkit::policy::evicting::EvictingCache;
///
/// let mut cache = EvictingCache::new(3);
/// cache.put(1, "first");
/// cache.put(2, "second");
/// cache.put(3, "third");
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(LruCacheTrait::peek_lru(&cache).map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving value
/// assert!(LruCacheTrait::touch(&mut cache, &2)); // Now key 3 is LRU
///
/// let (key, _) = LruCacheTrait::pop_lru(&mut cache).unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating access time.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less recent).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
