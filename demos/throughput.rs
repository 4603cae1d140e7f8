//! Rough single- and multi-threaded throughput of the shared handle.

use std::thread;
use std::time::Instant;

use boundcache::{Cache, EvictionKind};

const OPS: usize = 10_000;
const THREADS: usize = 4;

fn single_thread() {
    let cache: Cache<String, String> = Cache::new(1_000, EvictionKind::Lru).unwrap();

    let start = Instant::now();
    for i in 0..OPS {
        cache.put(format!("key_{i}"), format!("value_{i}"));
    }
    let write = start.elapsed().as_secs_f64();

    let start = Instant::now();
    for i in 0..OPS {
        cache.get(&format!("key_{i}"));
    }
    let read = start.elapsed().as_secs_f64();

    println!(
        "single-thread: {:.0} writes/sec, {:.0} reads/sec",
        OPS as f64 / write,
        OPS as f64 / read
    );
}

fn multi_thread() {
    let cache: Cache<String, String> = Cache::new(1_000, EvictionKind::Lru).unwrap();
    let per_thread = OPS / THREADS;

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in t * per_thread..(t + 1) * per_thread {
                    cache.put(format!("key_{i}"), format!("value_{i}"));
                    cache.get(&format!("key_{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let total = start.elapsed().as_secs_f64();

    println!(
        "multi-thread: {:.0} ops/sec across {THREADS} threads",
        (2 * OPS) as f64 / total
    );
    println!("{}", cache.stats());
}

fn main() {
    single_thread();
    multi_thread();
}
