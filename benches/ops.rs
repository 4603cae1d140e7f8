//! Micro-operation benchmarks for every eviction strategy.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for lookups, inserts under eviction
//! pressure and TTL sweeps, driving `CacheCore` directly so lock cost is
//! excluded.

use std::hint::black_box;
use std::time::{Duration, Instant};

use boundcache::{CacheCore, EvictionKind};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;

fn filled(kind: EvictionKind, now: Instant) -> CacheCore<u64, u64> {
    let mut cache = CacheCore::new(CAPACITY, kind).expect("capacity > 0");
    for i in 0..CAPACITY as u64 {
        cache.put_at(i, i, None, now);
    }
    cache
}

// ============================================================================
// Get Hit Latency
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    for kind in EvictionKind::ALL {
        group.bench_function(kind.as_str(), |b| {
            b.iter_custom(|iters| {
                let now = Instant::now();
                let mut cache = filled(kind, now);
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        let key = i % (CAPACITY as u64);
                        black_box(cache.get_at(&key, now));
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Get Miss Latency
// ============================================================================

fn bench_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_miss_ns");
    group.throughput(Throughput::Elements(OPS));

    for kind in EvictionKind::ALL {
        group.bench_function(kind.as_str(), |b| {
            b.iter_custom(|iters| {
                let now = Instant::now();
                let mut cache = filled(kind, now);
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        let key = CAPACITY as u64 + i;
                        black_box(cache.get_at(&key, now));
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Insert With Eviction
// ============================================================================

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_ns");
    group.throughput(Throughput::Elements(OPS));

    for kind in EvictionKind::ALL {
        group.bench_function(kind.as_str(), |b| {
            b.iter_custom(|iters| {
                let now = Instant::now();
                let mut cache = filled(kind, now);
                let mut next = CAPACITY as u64;
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        black_box(cache.put_at(next, next, None, now));
                        next += 1;
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// TTL Sweep
// ============================================================================

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.throughput(Throughput::Elements(CAPACITY as u64 / 2));

    group.bench_function("half_expired", |b| {
        b.iter_batched(
            || {
                let now = Instant::now();
                let mut cache = CacheCore::new(CAPACITY, EvictionKind::Lru).expect("capacity > 0");
                for i in 0..CAPACITY as u64 {
                    let ttl = if i % 2 == 0 { Duration::from_millis(1) } else { Duration::from_secs(3_600) };
                    cache.put_at(i, i, Some(ttl), now);
                }
                (cache, now + Duration::from_millis(5))
            },
            |(mut cache, later)| black_box(cache.cleanup_expired_at(later)),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_get_miss,
    bench_insert_evict,
    bench_sweep
);
criterion_main!(benches);
