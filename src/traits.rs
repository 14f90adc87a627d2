//! The capability set shared by every cache variant.
//!
//! [`LruCache`](crate::LruCache) and [`NaiveLruCache`](crate::NaiveLruCache)
//! behave identically and differ only in cost. Code that drives a cache, such
//! as tests and benchmarks, is written once against [`Cache`] and run against
//! either implementation.
//!
//! ```
//! use recency_cache::{Cache, LruCache, NaiveLruCache};
//!
//! fn fill<C: Cache<u32, u32>>(cache: &mut C, n: u32) {
//!     for i in 0..n {
//!         cache.put(i, i * 10);
//!     }
//! }
//!
//! let mut fast = LruCache::try_new(4).unwrap();
//! let mut slow = NaiveLruCache::try_new(4).unwrap();
//! fill(&mut fast, 8);
//! fill(&mut slow, 8);
//! assert_eq!(fast.len(), slow.len());
//! ```

use core::num::NonZeroUsize;

/// A bounded key/value cache with least-recently-used eviction.
///
/// None of the methods can fail: an absent key is a normal outcome reported
/// through `Option` or `bool`.
pub trait Cache<K, V> {
    /// Returns the value for `key` and marks it most recently used.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Stores `value` under `key`, evicting the least recently used entry if a
    /// new key would exceed capacity.
    ///
    /// Returns `false` only when `key` already holds an equal value. That case
    /// is a no-op and does not refresh the entry's recency.
    fn put(&mut self, key: K, value: V) -> bool;

    /// Deletes `key`; returns whether it was present.
    fn remove(&mut self, key: &K) -> bool;

    /// Membership test that leaves recency untouched.
    fn contains(&self, key: &K) -> bool;

    /// Drops every entry.
    fn clear(&mut self);

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Maximum number of entries.
    fn cap(&self) -> NonZeroUsize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
