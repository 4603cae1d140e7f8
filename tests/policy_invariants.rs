// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Property tests driving CacheCore with random operation sequences under every
// eviction strategy. A virtual clock (milliseconds past a fixed base instant)
// keeps expiry deterministic.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use boundcache::{CacheCore, EvictionKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u32, u32),
    PutTtl(u32, u32, u64),
    Get(u32),
    Delete(u32),
    Advance(u64),
    Sweep,
    Keys,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u32..24, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => (0u32..24, any::<u32>(), 0u64..40).prop_map(|(k, v, ttl)| Op::PutTtl(k, v, ttl)),
        4 => (0u32..24).prop_map(Op::Get),
        1 => (0u32..24).prop_map(Op::Delete),
        1 => (0u64..25).prop_map(Op::Advance),
        1 => Just(Op::Sweep),
        1 => Just(Op::Keys),
    ]
}

fn kind_strategy() -> impl Strategy<Value = EvictionKind> {
    prop_oneof![
        Just(EvictionKind::Lru),
        Just(EvictionKind::Mru),
        Just(EvictionKind::Lfu),
        Just(EvictionKind::Fifo),
    ]
}

// ==============================================
// Reference model (no TTL)
// ==============================================
//
// Linear-scan model of the four policies. Each record carries the sequence
// numbers its policy orders by; the cache must agree on every result.

#[derive(Debug, Clone, Copy)]
struct Record {
    key: u32,
    value: u32,
    recency: u64,
    inserted: u64,
    freq: u64,
}

#[derive(Debug)]
struct Model {
    kind: EvictionKind,
    capacity: usize,
    records: Vec<Record>,
    seq: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Model {
    fn new(kind: EvictionKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            records: Vec::new(),
            seq: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn position(&self, key: u32) -> Option<usize> {
        self.records.iter().position(|r| r.key == key)
    }

    fn rank(&self, r: &Record) -> (u64, u64) {
        match self.kind {
            EvictionKind::Lru | EvictionKind::Mru => (r.recency, 0),
            EvictionKind::Fifo => (r.inserted, 0),
            EvictionKind::Lfu => (r.freq, r.inserted),
        }
    }

    fn victim(&self) -> Option<usize> {
        let ranked = self.records.iter().enumerate();
        match self.kind {
            EvictionKind::Mru => ranked.max_by_key(|(_, r)| self.rank(r)).map(|(i, _)| i),
            _ => ranked.min_by_key(|(_, r)| self.rank(r)).map(|(i, _)| i),
        }
    }

    fn touch(&mut self, idx: usize) {
        let seq = self.tick();
        let record = &mut self.records[idx];
        record.recency = seq;
        record.freq += 1;
    }

    fn put(&mut self, key: u32, value: u32) -> Option<u32> {
        if let Some(idx) = self.position(key) {
            let previous = std::mem::replace(&mut self.records[idx].value, value);
            self.touch(idx);
            return Some(previous);
        }
        if self.records.len() >= self.capacity {
            if let Some(idx) = self.victim() {
                self.records.remove(idx);
                self.evictions += 1;
            }
        }
        let seq = self.tick();
        self.records.push(Record {
            key,
            value,
            recency: seq,
            inserted: seq,
            freq: 1,
        });
        None
    }

    fn get(&mut self, key: u32) -> Option<u32> {
        match self.position(key) {
            Some(idx) => {
                self.hits += 1;
                self.touch(idx);
                Some(self.records[idx].value)
            },
            None => {
                self.misses += 1;
                None
            },
        }
    }

    fn delete(&mut self, key: u32) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.records.remove(idx);
                true
            },
            None => false,
        }
    }

    fn keys(&self) -> Vec<u32> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| self.rank(r));
        records.into_iter().map(|r| r.key).collect()
    }
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_invariants_always_hold(
        kind in kind_strategy(),
        capacity in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let base = Instant::now();
        let mut clock = 0u64;
        let mut cache: CacheCore<u32, u32> = CacheCore::new(capacity, kind).unwrap();

        for op in ops {
            let now = base + Duration::from_millis(clock);
            match op {
                Op::Put(k, v) => { cache.put_at(k, v, None, now); },
                Op::PutTtl(k, v, ttl) => {
                    cache.put_at(k, v, Some(Duration::from_millis(ttl)), now);
                },
                Op::Get(k) => { cache.get_at(&k, now); },
                Op::Delete(k) => { cache.delete_at(&k, now); },
                Op::Advance(ms) => clock += ms,
                Op::Sweep => { cache.cleanup_expired_at(now); },
                Op::Keys => {
                    let keys = cache.keys_at(now);
                    prop_assert!(keys.iter().all(|k| cache.contains_at(k, now)));
                },
            }
            prop_assert!(cache.stored_len() <= capacity);
            if let Err(err) = cache.check_invariants() {
                return Err(TestCaseError::fail(err.to_string()));
            }
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_matches_reference_model(
        kind in kind_strategy(),
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..150)
    ) {
        let now = Instant::now();
        let mut cache: CacheCore<u32, u32> = CacheCore::new(capacity, kind).unwrap();
        let mut model = Model::new(kind, capacity);

        for op in ops {
            match op {
                Op::Put(k, v) | Op::PutTtl(k, v, _) => {
                    prop_assert_eq!(cache.put_at(k, v, None, now), model.put(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get_at(&k, now).copied(), model.get(k));
                },
                Op::Delete(k) => {
                    prop_assert_eq!(cache.delete_at(&k, now), model.delete(k));
                },
                Op::Advance(_) | Op::Sweep => {
                    prop_assert_eq!(cache.cleanup_expired_at(now), 0);
                },
                Op::Keys => {
                    prop_assert_eq!(cache.keys_at(now), model.keys());
                },
            }
        }

        prop_assert_eq!(cache.keys_at(now), model.keys());
        let stats = cache.stats_at(now);
        prop_assert_eq!(stats.hits, model.hits);
        prop_assert_eq!(stats.misses, model.misses);
        prop_assert_eq!(stats.evictions, model.evictions);
        prop_assert_eq!(stats.expired, 0);
        prop_assert_eq!(stats.current_size, model.records.len());
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_expired_values_are_never_returned(
        kind in kind_strategy(),
        capacity in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let base = Instant::now();
        let mut clock = 0u64;
        let mut cache: CacheCore<u32, u32> = CacheCore::new(capacity, kind).unwrap();
        // key -> (value, deadline in virtual ms) of the last put
        let mut last_put: HashMap<u32, (u32, Option<u64>)> = HashMap::new();
        let mut gets = 0u64;
        let mut hits = 0u64;

        for op in ops {
            let now = base + Duration::from_millis(clock);
            match op {
                Op::Put(k, v) => {
                    cache.put_at(k, v, None, now);
                    last_put.insert(k, (v, None));
                },
                Op::PutTtl(k, v, ttl) => {
                    cache.put_at(k, v, Some(Duration::from_millis(ttl)), now);
                    last_put.insert(k, (v, Some(clock + ttl)));
                },
                Op::Get(k) => {
                    gets += 1;
                    if let Some(&v) = cache.get_at(&k, now) {
                        hits += 1;
                        let (expected, deadline) = last_put[&k];
                        prop_assert_eq!(v, expected);
                        prop_assert!(deadline.is_none_or(|d| clock < d));
                    }
                },
                Op::Delete(k) => {
                    cache.delete_at(&k, now);
                    last_put.remove(&k);
                },
                Op::Advance(ms) => clock += ms,
                Op::Sweep | Op::Keys => {
                    cache.cleanup_expired_at(now);
                    for (id, (_, deadline)) in &last_put {
                        if deadline.is_some_and(|d| clock >= d) {
                            prop_assert!(!cache.contains_at(id, now));
                        }
                    }
                },
            }
        }

        let now = base + Duration::from_millis(clock);
        let stats = cache.stats_at(now);
        prop_assert_eq!(stats.total_requests, gets);
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.hits + stats.misses, stats.total_requests);
    }
}

// ==============================================
// Capacity-0 Behavior
// ==============================================

#[test]
fn capacity_zero_is_rejected_for_every_strategy() {
    for kind in EvictionKind::ALL {
        let err = CacheCore::<u32, u32>::new(0, kind).unwrap_err();
        assert!(err.to_string().contains("max_size"), "{kind}: {err}");
    }
}
