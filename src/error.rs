//! Error types for the chainkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. a zero-capacity evicting cache).
//! - [`IndexError`]: Returned by positional operations (`set`, `insert`,
//!   `remove_at`) when the index lies outside the container.
//! - [`InvariantError`]: Returned by `check_invariants` methods when the
//!   internal structures have drifted out of sync.
//!
//! Absent keys and empty containers are not errors: those cases surface as
//! `None` or `false` from the operation itself.
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::error::ConfigError;
//! use chainkit::policy::evicting::EvictingCache;
//!
//! let cache: Result<EvictingCache<String, i32>, ConfigError> = EvictingCache::try_new(8);
//! assert!(cache.is_ok());
//!
//! let bad = EvictingCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// IndexError
// ---------------------------------------------------------------------------

/// Error returned when a positional operation receives an out-of-range index.
///
/// # Example
///
/// ```
/// use chainkit::ds::DoublyLinkedList;
///
/// let mut list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
/// let err = list.set(7, 10).unwrap_err();
/// assert_eq!(err.index(), 7);
/// assert_eq!(err.len(), 3);
/// assert_eq!(err.to_string(), "index 7 out of bounds for length 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    index: usize,
    len: usize,
}

impl IndexError {
    /// Creates a new `IndexError` for `index` against a container of `len` elements.
    #[inline]
    pub fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// Returns the offending index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the container length at the time of the failed call.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of bounds for length {}",
            self.index, self.len
        )
    }
}

impl std::error::Error for IndexError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods such as
/// [`EvictingCache::check_invariants`](crate::policy::evicting::EvictingCache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by [`EvictingCache::try_new`](crate::policy::evicting::EvictingCache::try_new)
/// and [`EvictingCacheBuilder::try_build`](crate::builder::EvictingCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use chainkit::policy::evicting::EvictingCache;
///
/// let err = EvictingCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- IndexError -------------------------------------------------------

    #[test]
    fn index_display_names_index_and_len() {
        let err = IndexError::new(4, 2);
        assert_eq!(err.to_string(), "index 4 out of bounds for length 2");
    }

    #[test]
    fn index_accessors() {
        let err = IndexError::new(9, 3);
        assert_eq!(err.index(), 9);
        assert_eq!(err.len(), 3);
    }

    #[test]
    fn index_is_copy_and_eq() {
        let a = IndexError::new(1, 0);
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn index_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<IndexError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("recency list length mismatch");
        assert_eq!(err.to_string(), "recency list length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad capacity");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad capacity"));
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
