#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Type | Lookup | Eviction | Use for |
//! |------|--------|----------|---------|
//! | [`LruCache`] | O(1) hash index | O(1) list tail | Everything |
//! | [`NaiveLruCache`] | O(n) scan | O(1) deque back | Baselines and test oracles |
//!
//! Both implement [`Cache`], so code written against the trait runs on either.
//!
//! ## Semantics in One Place
//!
//! ```
//! use recency_cache::LruCache;
//!
//! let mut cache = LruCache::try_new(2).unwrap();
//!
//! assert!(cache.put(1, "a"));          // new key
//! assert!(!cache.put(1, "a"));         // same value: no-op, recency untouched
//! assert!(cache.put(1, "b"));          // new value: replaced and promoted
//! assert_eq!(cache.len(), 1);
//!
//! cache.put(2, "c");
//! cache.get(&1);                       // read promotes 1
//! cache.put(3, "d");                   // evicts 2, the least recently used
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//!
//! assert!(cache.remove(&3));
//! assert!(!cache.remove(&3));
//! cache.clear();
//! assert!(cache.is_empty());
//! ```
//!
//! ## Sharing Across Threads
//!
//! The caches are not synchronized. `get` reorders internal state, so wrap a
//! shared cache in a single exclusive lock (`Mutex`), never a reader/writer
//! lock.
//!
//! ## Modules
//!
//! - [`lru`]: the O(1) cache
//! - [`naive`]: the linear-scan baseline
//! - [`config`]: validated construction parameters
//! - [`error`]: construction errors
//! - [`metrics`]: per-cache counters
//! - [`traits`]: the shared [`Cache`] trait

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Construction errors.
pub mod error;

/// Cache configuration structures.
pub mod config;

/// Arena-backed doubly linked list used as the recency sequence.
///
/// Internal infrastructure; nodes are addressed by stable integer handles.
pub(crate) mod list;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache with O(1) operations that evicts the least
/// recently used entry when a new key arrives at capacity.
pub mod lru;

/// Linear-scan LRU cache used as a baseline.
pub mod naive;

/// Cache metrics system.
pub mod metrics;

/// The capability set shared by all cache variants.
pub mod traits;

pub use config::LruCacheConfig;
pub use error::CacheError;
pub use lru::LruCache;
pub use metrics::CacheMetrics;
pub use naive::NaiveLruCache;
pub use traits::Cache;
