//! Cache Configuration
//!
//! [`LruCacheConfig`] carries the single construction parameter shared by
//! [`LruCache`](crate::LruCache) and [`NaiveLruCache`](crate::NaiveLruCache):
//! the maximum number of entries.
//!
//! The field is public so a known-good capacity can be written directly. When
//! the capacity comes from user input, use [`LruCacheConfig::new`] or the
//! `TryFrom<i64>` conversion, which reject zero and negative values with
//! [`CacheError::InvalidCapacity`].
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::{CacheError, LruCache};
//! use core::num::NonZeroUsize;
//!
//! // Known-good capacity
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // Capacity from an untrusted source
//! assert_eq!(
//!     LruCacheConfig::try_from(-1i64).unwrap_err(),
//!     CacheError::InvalidCapacity(-1)
//! );
//! ```

use crate::error::CacheError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a bounded recency cache.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Validates `capacity` and builds a config from it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        NonZeroUsize::new(capacity)
            .map(Self::from)
            .ok_or(CacheError::InvalidCapacity(0))
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        LruCacheConfig { capacity }
    }
}

impl TryFrom<i64> for LruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        if capacity <= 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        usize::try_from(capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self::from)
            .ok_or(CacheError::InvalidCapacity(capacity))
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
