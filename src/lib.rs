//! chainkit: linked containers and a fixed-capacity LRU evicting cache.
//!
//! The [`EvictingCache`](policy::evicting::EvictingCache) pairs a hash map
//! store with a doubly linked recency list and a key→node index, giving O(1)
//! `get`, `put` and eviction. The linked containers it is built from are
//! public in [`ds`].

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
