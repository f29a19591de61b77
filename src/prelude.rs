pub use crate::builder::EvictingCacheBuilder;
pub use crate::ds::{
    DoublyLinkedList, LinkKind, LinkedList, LinkedMap, List, MultiMap, SetMultiMap, SlotArena,
    SlotId, Stack,
};
pub use crate::error::{ConfigError, IndexError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::EvictingMetricsSnapshot;
pub use crate::policy::evicting::EvictingCache;
pub use crate::store::{HashMapStore, StoreCore, StoreMut};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
