use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Used for counters recorded by read-only cache methods (`peek`,
/// `peek_lru`, `recency_rank`). Not `Sync`; the caches in this crate are
/// single-threaded.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}
