//! Side-by-side run of the O(1) cache and the linear-scan baseline.
//!
//! Run with: cargo run --example cache_comparison

extern crate recency_cache;

use recency_cache::config::LruCacheConfig;
use recency_cache::{Cache, CacheMetrics, LruCache, NaiveLruCache};
use std::time::Instant;

const VALUE: &str = "ABCDEFGHIJKLMNOPQRSTUV";

fn walkthrough<C: Cache<&'static str, i32> + CacheMetrics>(cache: &mut C) {
    println!("--- {} ---", cache.algorithm_name());
    for (key, value) in [("apple", 1), ("banana", 2), ("cherry", 3)] {
        cache.put(key, value);
    }
    println!("Filled with apple, banana, cherry (len {})", cache.len());

    cache.get(&"apple");
    println!("Read apple, so banana is now least recently used");

    println!("put(cherry, 3) again -> {} (unchanged)", cache.put("cherry", 3));
    println!("put(date, 4) -> {}", cache.put("date", 4));
    for key in ["apple", "banana", "cherry", "date"] {
        println!("  {key:<7} present: {}", cache.contains(&key));
    }

    for (name, value) in cache.metrics() {
        println!("  {name}: {value}");
    }
    println!();
}

fn fill_timed<C: Cache<usize, &'static str>>(label: &str, cache: &mut C) {
    let n = cache.cap().get() * 2;
    let start = Instant::now();
    for i in 0..n {
        cache.put(i, VALUE);
    }
    println!(
        "{label:<15} capacity {:>6}: {:>10.2?} for {n} puts",
        cache.cap(),
        start.elapsed()
    );
}

fn main() {
    println!("Recency Cache Comparison");
    println!("========================\n");

    let config = LruCacheConfig::new(3).unwrap();
    let mut lru: LruCache<&'static str, i32> = LruCache::init(config, None);
    let mut naive: NaiveLruCache<&'static str, i32> = NaiveLruCache::init(config);
    walkthrough(&mut lru);
    walkthrough(&mut naive);

    println!("Filling each cache with twice its capacity:");
    for cap in [1000, 10_000] {
        let config = LruCacheConfig::new(cap).unwrap();
        let mut lru: LruCache<usize, &'static str> = LruCache::init(config, None);
        let mut naive: NaiveLruCache<usize, &'static str> = NaiveLruCache::init(config);
        fill_timed("NaiveLruCache", &mut naive);
        fill_timed("LruCache", &mut lru);
    }

    match LruCacheConfig::try_from(-5i64) {
        Ok(_) => println!("unexpectedly accepted a negative capacity"),
        Err(err) => println!("\nRejected config: {err}"),
    }
}
