//! Cache Metrics
//!
//! Every cache counts what happened to it: lookups, hits, insertions, updates,
//! evictions and explicit removals. The counters are reported through the
//! [`CacheMetrics`] trait as a `BTreeMap`, so the key order is deterministic
//! and two caches can be compared line by line.
//!
//! `contains` and `peek` are observations, not requests, and are not counted.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters shared by all cache variants.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get` / `get_mut`).
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// New keys admitted by `put`.
    pub insertions: u64,

    /// `put` calls that replaced the value of an existing key.
    pub updates: u64,

    /// Entries discarded to make room for a new key.
    pub evictions: u64,

    /// Entries deleted through `remove`.
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records admission of a new key.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a value replacement for an existing key.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Lookups that missed, derived as `requests - cache_hits`.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Hit rate between 0.0 and 1.0, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss rate between 0.0 and 1.0, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a map with stable key ordering.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics
    }
}

/// Uniform metrics reporting for every cache variant.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the implementation, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
