//! Naive LRU Cache (baseline)
//!
//! [`NaiveLruCache`] keeps entries in a single `VecDeque` ordered from most
//! recently used (front) to least recently used (back), and finds a key by
//! scanning it. Every operation that looks up a key is O(n).
//!
//! It exists for two reasons:
//!
//! - as the baseline in benchmarks, to show what the key index in
//!   [`LruCache`](crate::LruCache) buys;
//! - as an oracle in tests, since its ordering is easy to verify by hand.
//!
//! Its observable behavior, every return value and the resulting `len`, is
//! identical to `LruCache`.

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::traits::Cache;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::num::NonZeroUsize;

/// A bounded LRU cache backed by a linearly scanned recency sequence.
///
/// # Examples
///
/// ```
/// use recency_cache::NaiveLruCache;
///
/// let mut cache = NaiveLruCache::try_new(2).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1);
/// cache.put(3, "c");
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// ```
pub struct NaiveLruCache<K, V> {
    cap: NonZeroUsize,
    entries: VecDeque<(K, V)>,
    metrics: CoreCacheMetrics,
}

impl<K: Eq, V> NaiveLruCache<K, V> {
    /// Creates a new naive cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        log::debug!("creating naive LRU cache with capacity {}", cap);
        NaiveLruCache {
            cap,
            entries: VecDeque::new(),
            metrics: CoreCacheMetrics::default(),
        }
    }

    /// Creates a new naive cache, validating `capacity` first.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        let config = LruCacheConfig::new(capacity)?;
        Ok(Self::init(config))
    }

    /// Creates a new naive cache from a configuration.
    pub fn init(config: LruCacheConfig) -> Self {
        Self::new(config.capacity)
    }

    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the counters collected so far.
    pub fn core_metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries
            .iter()
            .position(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
    }

    /// Returns the value for `key` and moves it to the front.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let Some(idx) = self.position(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.metrics.record_hit();
        if let Some(entry) = self.entries.remove(idx) {
            self.entries.push_front(entry);
        }
        self.entries.front().map(|(_, v)| v)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).is_some()
    }

    /// Deletes `key`; returns whether it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self.position(key) {
            Some(idx) => {
                self.entries.remove(idx);
                self.metrics.record_removal();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        log::debug!("clearing naive LRU cache with {} entries", self.entries.len());
        self.entries.clear();
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K: Eq, V: PartialEq> NaiveLruCache<K, V> {
    /// Stores `value` under `key`. Same contract as
    /// [`LruCache::put`](crate::LruCache::put).
    pub fn put(&mut self, key: K, value: V) -> bool {
        match self.position(&key) {
            Some(idx) => {
                if self.entries[idx].1 == value {
                    return false;
                }
                self.entries.remove(idx);
                self.metrics.record_update();
            }
            None => {
                while self.entries.len() >= self.cap.get() {
                    if self.entries.pop_back().is_none() {
                        break;
                    }
                    self.metrics.record_eviction();
                }
                self.metrics.record_insertion();
            }
        }
        self.entries.push_front((key, value));
        true
    }
}

impl<K: Eq, V: PartialEq> Cache<K, V> for NaiveLruCache<K, V> {
    fn get(&mut self, key: &K) -> Option<&V> {
        NaiveLruCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) -> bool {
        NaiveLruCache::put(self, key, value)
    }

    fn remove(&mut self, key: &K) -> bool {
        NaiveLruCache::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        NaiveLruCache::contains(self, key)
    }

    fn clear(&mut self) {
        NaiveLruCache::clear(self)
    }

    fn len(&self) -> usize {
        NaiveLruCache::len(self)
    }

    fn cap(&self) -> NonZeroUsize {
        NaiveLruCache::cap(self)
    }
}

impl<K, V> CacheMetrics for NaiveLruCache<K, V> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "NaiveLRU"
    }
}

impl<K, V> fmt::Debug for NaiveLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaiveLruCache")
            .field("capacity", &self.cap)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn keys<K: Eq + Clone, V>(cache: &NaiveLruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_naive_get_promotes() {
        let mut cache = NaiveLruCache::try_new(3).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(keys(&cache), [1, 3, 2]);
        assert_eq!(cache.get(&9), None);
        assert_eq!(keys(&cache), [1, 3, 2]);
    }

    #[test]
    fn test_naive_put_semantics() {
        let mut cache = NaiveLruCache::try_new(3).unwrap();
        assert!(cache.put(1, "a"));
        assert!(cache.put(2, "b"));
        assert!(!cache.put(1, "a"));
        assert_eq!(keys(&cache), [2, 1]);
        assert!(cache.put(1, "z"));
        assert_eq!(keys(&cache), [1, 2]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_naive_eviction() {
        let mut cache = NaiveLruCache::try_new(2).unwrap();
        for i in 0..5 {
            cache.put(i, i);
        }
        assert_eq!(keys(&cache), [4, 3]);
        assert_eq!(cache.core_metrics().evictions, 3);
        assert_eq!(cache.algorithm_name(), "NaiveLRU");
    }

    #[test]
    fn test_naive_remove_and_clear() {
        let mut cache = NaiveLruCache::try_new(4).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.remove(&"a"));
        assert!(!cache.remove(&"a"));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn test_naive_rejects_zero_capacity() {
        assert_eq!(
            NaiveLruCache::<u8, u8>::try_new(0).unwrap_err(),
            CacheError::InvalidCapacity(0)
        );
    }
}
