//! Frequency buckets for LFU tracking.
//!
//! Each distinct access frequency owns a bucket of the arena slots
//! currently at that frequency, ordered by the slot's insertion rank.
//! Buckets are chained in ascending frequency order and `min_freq` names
//! the head of the chain, so the LFU victim is always the lowest-ranked
//! member of `buckets[min_freq]`.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: FxHashMap<u64, Bucket>
//!
//!   min_freq = 1
//!       │
//!       ▼
//!   freq=1: { rank 4 ─► id_2, rank 9 ─► id_5 }      (BTreeMap by rank)
//!              │
//!           victim
//!   freq=3: { rank 0 ─► id_0 }
//!
//!   chain:  1 ──next──► 3
//!           1 ◄──prev── 3
//! ```
//!
//! A member keeps its rank for life, so ties at any frequency go to the
//! earliest insert no matter in which order the tied members got there.
//!
//! ## Operations
//!
//! | Operation   | Time         | Notes                                        |
//! |-------------|--------------|----------------------------------------------|
//! | `insert`    | O(log b)     | New member starts at freq=1                  |
//! | `touch`     | O(log b)     | freq+1, moves into the next bucket by rank   |
//! | `remove`    | O(log b)     | Drops an empty bucket and repairs `min_freq` |
//! | `peek_min`  | O(log b)     | First rank of the `min_freq` bucket          |
//! | `iter`      | O(n)         | Ascending frequency, rank order in bucket    |
//!
//! `b` is the size of the bucket involved; the bucket chain itself is
//! maintained in O(1).

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::Linked;
use crate::ds::slot_arena::{SlotArena, SlotId};

/// Arena value that can be a member of [`FrequencyBuckets`].
pub trait FrequencyNode: Linked {
    fn freq(&self) -> u64;
    fn set_freq(&mut self, freq: u64);

    /// Tie-break key within a bucket; lower is evicted first. Must be
    /// unique among members and fixed while the node is a member.
    fn rank(&self) -> u64;
}

#[derive(Debug, Default)]
struct Bucket {
    members: BTreeMap<u64, SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Frequency index with `min_freq` tracking.
#[derive(Debug, Default)]
pub struct FrequencyBuckets {
    buckets: FxHashMap<u64, Bucket>,
    min_freq: u64,
    len: usize,
}

impl FrequencyBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the lowest frequency with members, if any.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    /// Number of distinct frequencies currently in use.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Adds a fresh member at frequency 1.
    pub fn insert<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        let Some(node) = arena.get_mut(id) else {
            return false;
        };
        node.set_freq(1);
        let rank = node.rank();

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq().filter(|&freq| freq > 1);
            self.insert_bucket(1, None, next);
        }
        self.min_freq = 1;
        self.push_member(1, rank, id);
        self.len += 1;
        true
    }

    /// Bumps a member's frequency and returns the new value.
    ///
    /// At `u64::MAX` the frequency saturates and the member stays where it is.
    pub fn touch<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> Option<u64> {
        let node = arena.get(id)?;
        let (current, rank) = (node.freq(), node.rank());
        let (prev, next) = {
            let bucket = self.buckets.get(&current)?;
            if bucket.members.get(&rank) != Some(&id) {
                return None;
            }
            (bucket.prev, bucket.next)
        };

        if current == u64::MAX {
            return Some(current);
        }
        let bumped = current + 1;

        if !self.buckets.contains_key(&bumped) {
            self.insert_bucket(bumped, Some(current), next);
        }

        self.buckets.get_mut(&current)?.members.remove(&rank);
        if let Some(node) = arena.get_mut(id) {
            node.set_freq(bumped);
        }
        self.push_member(bumped, rank, id);

        if self.bucket_is_empty(current) {
            // `bumped` now sits between `prev` and the old `next`.
            self.remove_bucket(current, prev, Some(bumped));
            if self.min_freq == current {
                self.min_freq = bumped;
            }
        }
        Some(bumped)
    }

    /// Drops a member; returns the frequency it had.
    pub fn remove<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> Option<u64> {
        let node = arena.get(id)?;
        let (freq, rank) = (node.freq(), node.rank());
        let bucket = self.buckets.get_mut(&freq)?;
        if bucket.members.get(&rank) != Some(&id) {
            return None;
        }
        bucket.members.remove(&rank);
        let (prev, next) = (bucket.prev, bucket.next);
        let now_empty = bucket.members.is_empty();
        self.len -= 1;

        if now_empty {
            self.remove_bucket(freq, prev, next);
            if self.min_freq == freq {
                self.min_freq = next.unwrap_or(0);
            }
        }
        Some(freq)
    }

    /// The LFU victim: earliest-inserted member of the lowest bucket.
    pub fn peek_min(&self) -> Option<SlotId> {
        self.buckets
            .get(&self.min_freq)?
            .members
            .first_key_value()
            .map(|(_, &id)| id)
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.min_freq = 0;
        self.len = 0;
    }

    /// Iterates members by ascending frequency, rank order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        let mut freqs = Vec::with_capacity(self.buckets.len());
        let mut cursor = self.min_freq();
        while let Some(freq) = cursor {
            freqs.push(freq);
            cursor = self.buckets.get(&freq).and_then(|bucket| bucket.next);
        }
        freqs
            .into_iter()
            .filter_map(move |freq| self.buckets.get(&freq))
            .flat_map(|bucket| bucket.members.values().copied())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<T: FrequencyNode>(&self, arena: &SlotArena<T>) {
        if self.len == 0 {
            assert!(self.buckets.is_empty());
            assert_eq!(self.min_freq, 0);
            return;
        }
        assert!(self.buckets.contains_key(&self.min_freq));

        let mut counted = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(!bucket.members.is_empty(), "empty bucket {freq} kept");
            match bucket.prev {
                Some(prev) => {
                    assert!(prev < freq);
                    assert_eq!(self.buckets[&prev].next, Some(freq));
                },
                None => assert_eq!(self.min_freq, freq),
            }
            if let Some(next) = bucket.next {
                assert!(next > freq);
                assert_eq!(self.buckets[&next].prev, Some(freq));
            }
            for (&rank, &id) in &bucket.members {
                let node = arena.get(id).expect("bucket member not in arena");
                assert_eq!(node.freq(), freq);
                assert_eq!(node.rank(), rank);
            }
            counted += bucket.members.len();
        }
        assert_eq!(counted, self.len);
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .is_none_or(|bucket| bucket.members.is_empty())
    }

    fn push_member(&mut self, freq: u64, rank: u64, id: SlotId) {
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.members.insert(rank, id);
        }
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                members: BTreeMap::new(),
                prev,
                next,
            },
        );
        if let Some(bucket) = prev.and_then(|prev| self.buckets.get_mut(&prev)) {
            bucket.next = Some(freq);
        }
        if let Some(bucket) = next.and_then(|next| self.buckets.get_mut(&next)) {
            bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(bucket) = prev.and_then(|prev| self.buckets.get_mut(&prev)) {
            bucket.next = next;
        }
        if let Some(bucket) = next.and_then(|next| self.buckets.get_mut(&next)) {
            bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }
}
