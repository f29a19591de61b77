//! Builder for evicting caches.
//!
//! Collects construction options before the key and value types are known.
//!
//! ## Example
//!
//! ```rust
//! use chainkit::builder::EvictingCacheBuilder;
//!
//! let mut cache = EvictingCacheBuilder::new(100)
//!     .prealloc(true)
//!     .build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::evicting::EvictingCache;

/// Builder for [`EvictingCache`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictingCacheBuilder {
    capacity: usize,
    prealloc: bool,
}

impl EvictingCacheBuilder {
    /// Create a new builder for a cache of `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            prealloc: false,
        }
    }

    /// Reserve storage for `capacity` entries at construction instead of
    /// growing on demand.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.prealloc = prealloc;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chainkit::builder::EvictingCacheBuilder;
    ///
    /// let cache = EvictingCacheBuilder::new(16).build::<&str, u32>();
    /// assert_eq!(cache.capacity(), 16);
    /// ```
    pub fn build<K, V>(self) -> EvictingCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build the cache, returning [`ConfigError`] for a zero capacity.
    pub fn try_build<K, V>(self) -> Result<EvictingCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let reserve = if self.prealloc { self.capacity } else { 0 };
        EvictingCache::with_reserved(self.capacity, reserve)
    }
}
