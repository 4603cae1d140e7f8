//! Walkthrough of the cache API: basic operations, TTL, a strategy
//! comparison and a full LRU run.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use boundcache::{Cache, CacheConfig, EvictionKind};

fn basic_operations() {
    println!("Basic Operations");
    let cache: Cache<&str, HashMap<&str, String>> = Cache::new(3, EvictionKind::Lru).unwrap();
    cache.put("user:1", HashMap::from([("name", "A".to_string()), ("age", "30".to_string())]));
    cache.put("user:2", HashMap::from([("name", "S".to_string()), ("age", "25".to_string())]));
    println!("User 1: {:?}", cache.get("user:1").map(|user| user["name"].clone()));
    println!("User 2: {:?}", cache.get("user:2").map(|user| user["name"].clone()));
    println!("Stats: {}", cache.stats());
    println!();
}

fn ttl_example() {
    println!("TTL Example");
    let cache: Cache<&str, &str> = Cache::from_config(CacheConfig::default()).unwrap();
    cache.put_with_ttl_secs("session:abc", "active", 0.5).unwrap();
    println!("Session (immediate): {:?}", cache.get("session:abc"));
    thread::sleep(Duration::from_millis(600));
    println!("Session (expired): {:?}", cache.get("session:abc"));
    println!();
}

fn comparison() {
    println!("Strategy Comparison");
    for strategy in ["lru", "mru", "lfu", "fifo"] {
        let cache: Cache<&str, u32> = Cache::with_strategy_name(2, strategy).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get("a");
        cache.put("c", 3);
        println!(
            "{}: a={:?}, b={:?}, c={:?}",
            strategy.to_uppercase(),
            cache.get("a"),
            cache.get("b"),
            cache.get("c")
        );
    }
    println!();
}

fn comprehensive() {
    println!("Comprehensive Test");
    let cache: Cache<String, String> = Cache::new(5, EvictionKind::Lru).unwrap();
    for i in 0..5 {
        cache.put(format!("key{i}"), format!("value{i}"));
    }
    println!("Initial cache size: {}", cache.size());

    cache.get("key0");
    cache.get("key2");

    cache.put("key5".to_string(), "value5".to_string());
    println!("After eviction:");
    for i in 0..6 {
        println!("key{i}: {:?}", cache.get(&format!("key{i}")));
    }
    println!("Final stats: {}", cache.stats());
}

fn main() {
    basic_operations();
    ttl_example();
    comparison();
    comprehensive();
}

// Strategy comparison output:
// LRU: a=Some(1), b=None, c=Some(3)
// MRU: a=None, b=Some(2), c=Some(3)
// LFU: a=Some(1), b=None, c=Some(3)
// FIFO: a=None, b=Some(2), c=Some(3)
//
// In the comprehensive run key1 is evicted: key0 and key2 were read, so
// key1 is the least recently used when key5 arrives.
