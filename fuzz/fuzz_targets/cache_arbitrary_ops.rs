#![no_main]

use std::time::{Duration, Instant};

use boundcache::{CacheCore, EvictionKind};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on CacheCore
//
// First byte picks the strategy and capacity; the rest is decoded as
// (op, key, arg) triples. A virtual clock advances on demand so expiry paths
// are reached without sleeping.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let kind = EvictionKind::ALL[(data[0] % 4) as usize];
    let capacity = usize::from(data[1] % 16) + 1;
    let mut cache: CacheCore<u8, u32> = CacheCore::new(capacity, kind).unwrap();

    let base = Instant::now();
    let mut clock_ms = 0u64;
    let mut gets = 0u64;

    for chunk in data[2..].chunks_exact(3) {
        let (op, key, arg) = (chunk[0] % 8, chunk[1] % 32, chunk[2]);
        let now = base + Duration::from_millis(clock_ms);

        match op {
            0 | 1 => {
                // put
                cache.put_at(key, u32::from(arg), None, now);
                assert!(cache.contains_at(&key, now));
            }
            2 => {
                // put with ttl
                let ttl = Duration::from_millis(u64::from(arg));
                cache.put_at(key, u32::from(arg), Some(ttl), now);
                assert_eq!(cache.contains_at(&key, now), arg > 0);
            }
            3 | 4 => {
                // get
                gets += 1;
                let peeked = cache.peek_at(&key, now).copied();
                assert_eq!(cache.get_at(&key, now).copied(), peeked);
            }
            5 => {
                // delete
                let live = cache.contains_at(&key, now);
                assert_eq!(cache.delete_at(&key, now), live);
                assert!(!cache.contains_at(&key, now));
            }
            6 => {
                // advance clock
                clock_ms += u64::from(arg);
            }
            _ => {
                // sweep
                cache.cleanup_expired_at(now);
                let keys = cache.keys_at(now);
                assert_eq!(keys.len(), cache.stored_len());
            }
        }

        assert!(cache.stored_len() <= capacity);
        cache.check_invariants().unwrap();
    }

    let now = base + Duration::from_millis(clock_ms);
    let stats = cache.stats_at(now);
    assert_eq!(stats.total_requests, gets);
    assert_eq!(stats.hits + stats.misses, gets);
});
