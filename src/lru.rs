//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides the O(1) bounded recency cache. It combines two
//! structures that are always mutated together:
//!
//! - a **key index** (`HashMap<K, NodeId>`) that finds a key's node in
//!   constant time, and
//! - a **recency list**, an arena-backed doubly linked list of `(K, V)` pairs
//!   ordered from most recently used (front) to least recently used (back).
//!
//! ```text
//!   map: HashMap<K, NodeId>        list: arena slots linked by NodeId
//!   ┌──────┬──────┐
//!   │ "a"  │ id 2 │                front                              back
//!   │ "b"  │ id 0 │                [2: "a"] ◀──▶ [1: "c"] ◀──▶ [0: "b"]
//!   │ "c"  │ id 1 │
//!   └──────┴──────┘
//! ```
//!
//! # Algorithm
//!
//! - `get` looks the key up in the map and moves its node to the front.
//! - `put` of a new key evicts from the back while the cache is at capacity,
//!   then adds a node at the front and indexes it.
//! - `put` of an existing key with a different value moves the node to the
//!   front and swaps the value in place.
//! - `put` of an existing key with an equal value changes nothing and returns
//!   `false`. Unlike `get`, it does **not** refresh recency.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!   - Contains: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity; the arena and the map are sized for the
//!     capacity up front (bounded by [`MAX_PREALLOCATED_ENTRIES`]).
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. `get` reorders the recency list, so
//! even readers need exclusive access: wrap the cache in a `Mutex`, not an
//! `RwLock`.

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::list::{self, List, NodeId};
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::traits::Cache;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the number of entries reserved at construction.
///
/// Larger caches still work; they grow their storage on demand past this point.
pub const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, updating and removing entries. When a new key
/// arrives while the cache is full, the least recently used entry is evicted.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// assert!(cache.put("apple", 1));
/// assert!(cache.put("banana", 2));
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert!(!cache.contains(&"banana"));
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
///
/// // Re-putting an equal value is a no-op
/// assert!(!cache.put("cherry", 3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    list: List<(K, V)>,
    map: HashMap<K, NodeId, S>,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache, validating `capacity` first.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<LruCache<K, V, DefaultHashBuilder>, CacheError> {
        let config = LruCacheConfig::new(capacity)?;
        Ok(LruCache::new(config.capacity))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// ```
    /// use recency_cache::config::LruCacheConfig;
    /// use recency_cache::LruCache;
    ///
    /// let config = LruCacheConfig::try_from(100i64).unwrap();
    /// let cache: LruCache<u64, String> = LruCache::init(config, None);
    /// assert_eq!(cache.cap().get(), 100);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let reserve = cap.get().min(MAX_PREALLOCATED_ENTRIES);
        log::debug!("creating LRU cache with capacity {}", cap);
        LruCache {
            list: List::new(cap, reserve),
            map: HashMap::with_capacity_and_hasher(reserve, hash_builder),
            metrics: CoreCacheMetrics::default(),
        }
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.list.cap()
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the counters collected so far.
    #[inline]
    pub fn core_metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }

    /// Returns the value for `key` and moves it to the most recently used
    /// position. A miss leaves the cache unchanged.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.promote(key) {
            Some(node) => self.list.get_value(node).map(|(_, v)| v),
            None => None,
        }
    }

    /// Mutable counterpart of [`get`](Self::get); also promotes the entry.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.promote(key)?;
        self.list.get_value_mut(node).map(|(_, v)| v)
    }

    /// Returns the value for `key` without touching recency or metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = *self.map.get(key)?;
        self.list.get_value(node).map(|(_, v)| v)
    }

    /// Membership test; does not affect recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Deletes `key` from both the index and the recency list.
    ///
    /// Returns whether the key was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.remove(key) {
            Some(node) => {
                self.list.remove(node);
                self.metrics.record_removal();
                log::trace!("removed entry, {} left", self.list.len());
                true
            }
            None => false,
        }
    }

    /// Drops every entry. Capacity and metrics are kept.
    pub fn clear(&mut self) {
        log::debug!("clearing LRU cache with {} entries", self.list.len());
        self.map.clear();
        self.list.clear();
    }

    /// Returns the least recently used entry, the next eviction victim,
    /// without promoting it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let node = self.list.back()?;
        self.list.get_value(node).map(|(k, v)| (k, v))
    }

    /// Iterates entries from most to least recently used without promoting
    /// any of them.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Looks `key` up and moves its node to the front, recording the outcome.
    fn promote<Q>(&mut self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.list.move_to_front(node);
                self.metrics.record_hit();
                Some(node)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Evicts from the back until one more entry fits.
    fn evict_to_fit(&mut self) {
        while self.list.len() >= self.list.cap().get() {
            let Some((key, _)) = self.list.remove_last() else {
                break;
            };
            self.map.remove(&key);
            self.metrics.record_eviction();
            log::trace!("evicted least recently used entry");
        }
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq, S: BuildHasher> LruCache<K, V, S> {
    /// Stores `value` under `key` and makes it the most recently used entry.
    ///
    /// - If `key` already holds an equal value nothing changes, recency
    ///   included, and `false` is returned.
    /// - If `key` holds a different value, the value is replaced and the entry
    ///   moves to the front.
    /// - If `key` is new, least recently used entries are evicted until there
    ///   is room, then the entry is added at the front.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if let Some(&node) = self.map.get(&key) {
            if self.list.get_value(node).is_some_and(|(_, v)| *v == value) {
                return false;
            }
            self.list.move_to_front(node);
            self.list.update(node, (key, value));
            self.metrics.record_update();
            log::trace!("updated existing entry");
            return true;
        }

        self.evict_to_fit();
        match self.list.add((key.clone(), value)) {
            Some(node) => {
                self.map.insert(key, node);
                self.metrics.record_insertion();
                true
            }
            None => false,
        }
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq, S: BuildHasher> Cache<K, V> for LruCache<K, V, S> {
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) -> bool {
        LruCache::put(self, key, value)
    }

    fn remove(&mut self, key: &K) -> bool {
        LruCache::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn cap(&self) -> NonZeroUsize {
        LruCache::cap(self)
    }
}

impl<K, V, S> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.list.cap())
            .field("len", &self.map.len())
            .finish()
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("inner", &self.inner).finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
        fn check_invariants(&self) {
            self.list.check_invariants();
            assert_eq!(self.map.len(), self.list.len());
            assert!(self.len() <= self.cap().get());
            for (key, node) in self.map.iter() {
                let (stored, _) = self
                    .list
                    .get_value(*node)
                    .expect("indexed node must be live");
                assert!(stored == key, "index and list disagree on a key");
            }
        }
    }

    fn keys<K: Clone + Hash + Eq, V, S: BuildHasher>(cache: &LruCache<K, V, S>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        assert!(cache.put("apple", 1));
        assert!(cache.put("banana", 2));
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert!(cache.put("apple", 3));
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert!(cache.put("cherry", 4));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_put_same_value_is_noop() {
        let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        assert_eq!(keys(&cache), [3, 2, 1]);

        // Unchanged value: no relocation
        assert!(!cache.put(1, "one"));
        assert_eq!(keys(&cache), [3, 2, 1]);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.peek_lru(), Some((&1, &"one")));

        // So key 1 is still the eviction victim
        cache.put(4, "four");
        assert!(!cache.contains(&1));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_put_new_value_relocates() {
        let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert!(cache.put(1, "uno"));
        assert_eq!(keys(&cache), [1, 3, 2]);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.peek(&1), Some(&"uno"));

        cache.put(4, "four");
        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.peek(&"apple"), Some(&1));
        assert!(cache.contains(&"apple"));
        cache.put("cherry", 3);
        assert!(!cache.contains(&"apple"));
        assert_eq!(cache.core_metrics().requests, 0);
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert!(cache.remove(&"apple"));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert!(!cache.remove(&"cherry"));
        assert_eq!(cache.len(), 1);
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert!(!cache.contains(&"apple"));
        cache.check_invariants();
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut cache = LruCache::new(NonZeroUsize::new(1).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains(&"apple"));
        assert_eq!(cache.get(&"banana"), Some(&2));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut cache = LruCache::new(NonZeroUsize::new(10).unwrap());
        for i in 0..20 {
            cache.put(i, i * 100);
            cache.check_invariants();
        }
        assert_eq!(cache.len(), 10);
        assert_eq!(keys(&cache), (10..20).rev().collect::<Vec<_>>());
        assert_eq!(cache.core_metrics().evictions, 10);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
        assert!(cache.contains("banana"));
        assert!(cache.remove("apple"));
        cache.check_invariants();
    }

    #[derive(Debug, Clone, Eq, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    #[test]
    fn test_lru_complex_values() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        let fruit1 = ComplexValue {
            val: 1,
            description: String::from("First fruit"),
        };
        let fruit2 = ComplexValue {
            val: 2,
            description: String::from("Second fruit"),
        };
        cache.put(String::from("apple"), fruit1.clone());
        assert!(!cache.put(String::from("apple"), fruit1.clone()));
        assert!(cache.put(String::from("apple"), fruit2.clone()));
        assert_eq!(cache.get("apple"), Some(&fruit2));
        assert_eq!(cache.core_metrics().updates, 1);
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &0.0);

        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple");
        cache.get(&"banana");
        cache.get(&"durian");
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits").unwrap(), &2.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &1.0);
        assert_eq!(metrics.get("requests").unwrap(), &3.0);
        assert_eq!(metrics.get("insertions").unwrap(), &2.0);

        cache.put("cherry", 3);
        cache.remove(&"cherry");
        let metrics = cache.metrics();
        assert_eq!(metrics.get("evictions").unwrap(), &1.0);
        assert_eq!(metrics.get("removals").unwrap(), &1.0);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_try_new() {
        assert_eq!(
            LruCache::<u32, u32>::try_new(0).unwrap_err(),
            CacheError::InvalidCapacity(0)
        );
        let cache = LruCache::<u32, u32>::try_new(7).unwrap();
        assert_eq!(cache.cap().get(), 7);
    }

    #[test]
    fn test_lru_large_capacity_is_lazy() {
        let cache = LruCache::<u32, u32>::new(NonZeroUsize::new(usize::MAX).unwrap());
        assert_eq!(cache.cap().get(), usize::MAX);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_concurrent_access() {
        extern crate std;
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LruCache::new(NonZeroUsize::new(100).unwrap())));
        let num_threads = 4;
        let ops_per_thread = 100;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    guard.put(key.clone(), t * 1000 + i);
                    let _ = guard.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert_eq!(guard.len(), 100);
        guard.check_invariants();
    }
}
