// ==============================================
// CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Every Cache operation runs under one mutex. These tests hammer a shared
// handle from several threads and check that capacity, counters and the
// store/order-index bijection survive.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use boundcache::{Cache, EvictionKind};
use parking_lot::Mutex;

fn run_threads<F>(num_threads: usize, f: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(num_threads));
    let f = Arc::new(f);
    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let barrier = barrier.clone();
            let f = f.clone();
            thread::spawn(move || {
                barrier.wait();
                f(t);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

// ==============================================
// Capacity under contention
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn concurrent_inserts_respect_capacity() {
        for kind in EvictionKind::ALL {
            let capacity = 10;
            let num_threads = 8;
            let cache: Cache<u64, u64> = Cache::new(capacity, kind).unwrap();

            let shared = cache.clone();
            run_threads(num_threads, move |t| {
                for i in 0..200u64 {
                    shared.put(t as u64 * 10_000 + i, i);
                }
            });

            assert_eq!(cache.size(), capacity, "{kind}");
            let stats = cache.stats();
            assert_eq!(stats.evictions, (num_threads * 200 - capacity) as u64, "{kind}");
            cache.with_core(|core| core.check_invariants()).unwrap();
        }
    }

    #[test]
    fn observers_never_see_capacity_exceeded_while_writers_run() {
        const WRITERS: usize = 3;
        const CAPACITY: usize = 16;

        for kind in EvictionKind::ALL {
            let cache: Cache<u64, u64> = Cache::new(CAPACITY, kind).unwrap();
            let finished = Arc::new(AtomicUsize::new(0));
            // (key, evictions counted before its put)
            let latest: Arc<Mutex<Option<(u64, u64)>>> = Arc::new(Mutex::new(None));
            let observations = Arc::new(AtomicU64::new(0));

            let shared = cache.clone();
            let done = finished.clone();
            let published = latest.clone();
            let observed = observations.clone();
            run_threads(WRITERS + 1, move |t| {
                if t == 0 {
                    loop {
                        let writers_done = done.load(Ordering::Acquire) == WRITERS;

                        let size = shared.size();
                        assert!(size <= CAPACITY, "{kind}: size {size} > {CAPACITY}");
                        shared
                            .with_core(|core| core.check_invariants())
                            .unwrap_or_else(|err| panic!("{kind}: {err}"));

                        let snapshot = *published.lock();
                        if let Some((key, evictions_before)) = snapshot {
                            match shared.get(&key) {
                                Some(value) => assert_eq!(value, key * 2, "{kind}"),
                                None => assert!(
                                    shared.stats().evictions > evictions_before,
                                    "{kind}: key {key} vanished without an eviction"
                                ),
                            }
                        }
                        observed.fetch_add(1, Ordering::Relaxed);

                        if writers_done {
                            break;
                        }
                    }
                } else {
                    for i in 0..2_000u64 {
                        let key = t as u64 * 100_000 + i;
                        let evictions_before = shared.stats().evictions;
                        shared.put(key, key * 2);
                        *published.lock() = Some((key, evictions_before));

                        match shared.get(&key) {
                            Some(value) => assert_eq!(value, key * 2, "{kind}"),
                            None => assert!(shared.stats().evictions > evictions_before, "{kind}"),
                        }
                    }
                    done.fetch_add(1, Ordering::Release);
                }
            });

            assert!(observations.load(Ordering::Relaxed) >= 1);
            assert_eq!(cache.size(), CAPACITY, "{kind}");
            cache.with_core(|core| core.check_invariants()).unwrap();
        }
    }

    #[test]
    fn same_key_updates_never_evict() {
        let cache: Cache<&'static str, u64> = Cache::new(2, EvictionKind::Lru).unwrap();
        cache.put("other", 0);

        let shared = cache.clone();
        run_threads(6, move |t| {
            for i in 0..500u64 {
                shared.put("hot", t as u64 * 1_000 + i);
            }
        });

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.stats().evictions, 0);
        assert!(cache.contains("other"));
    }
}

// ==============================================
// Counter accounting
// ==============================================

mod accounting {
    use super::*;

    #[test]
    fn every_get_is_one_hit_or_one_miss() {
        let cache: Cache<u64, u64> = Cache::new(32, EvictionKind::Lfu).unwrap();
        let observed_hits = Arc::new(AtomicU64::new(0));

        let shared = cache.clone();
        let hits = observed_hits.clone();
        run_threads(4, move |t| {
            for i in 0..1_000u64 {
                let key = (i * 7 + t as u64) % 64;
                if i % 3 == 0 {
                    shared.put(key, i);
                } else if shared.get(&key).is_some() {
                    hits.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

        let stats = cache.stats();
        let gets_per_thread = (0..1_000u64).filter(|i| i % 3 != 0).count() as u64;
        assert_eq!(stats.total_requests, 4 * gets_per_thread);
        assert_eq!(stats.hits, observed_hits.load(Ordering::Relaxed));
        assert_eq!(stats.hits + stats.misses, stats.total_requests);
        cache.with_core(|core| core.check_invariants()).unwrap();
    }

    #[test]
    fn delete_and_put_race_leaves_consistent_state() {
        for _ in 0..50 {
            let cache: Cache<u64, String> = Cache::new(4, EvictionKind::Fifo).unwrap();
            for k in 0..4 {
                cache.put(k, format!("v{k}"));
            }

            let shared = cache.clone();
            run_threads(3, move |t| match t {
                0 => {
                    shared.delete(&1);
                },
                1 => {
                    shared.put(1, "updated".to_string());
                },
                _ => {
                    shared.put(9, "new".to_string());
                },
            });

            if let Some(value) = cache.get(&1) {
                assert!(value == "v1" || value == "updated", "unexpected value {value}");
            }
            assert!(cache.size() <= 4);
            cache.with_core(|core| core.check_invariants()).unwrap();
        }
    }
}

// ==============================================
// Expiry under contention
// ==============================================

mod expiry {
    use super::*;

    #[test]
    fn concurrent_sweeps_count_each_expiry_once() {
        let cache: Cache<u64, u64> = Cache::new(256, EvictionKind::Lru).unwrap();
        for k in 0..100 {
            cache.put_with_ttl(k, k, Duration::from_millis(20));
        }
        for k in 100..150 {
            cache.put(k, k);
        }
        thread::sleep(Duration::from_millis(40));

        let removed = Arc::new(AtomicU64::new(0));
        let shared = cache.clone();
        let total = removed.clone();
        run_threads(4, move |_| {
            let n = shared.cleanup_expired() as u64;
            total.fetch_add(n, Ordering::Relaxed);
        });

        assert_eq!(removed.load(Ordering::Relaxed), 100);
        let stats = cache.stats();
        assert_eq!(stats.expired, 100);
        assert_eq!(stats.current_size, 50);
    }
}
