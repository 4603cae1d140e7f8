//! Frequency order for LFU eviction, backed by [`FrequencyBuckets`].
//!
//! Inserts join the frequency-1 bucket; each access moves the slot one
//! bucket up. The victim is the earliest-inserted slot of the lowest
//! bucket: among the least frequently used, the oldest insert goes first.

use crate::ds::frequency_buckets::{FrequencyBuckets, FrequencyNode};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::policy::OrderPolicy;

#[derive(Debug, Default)]
pub struct FrequencyOrder {
    buckets: FrequencyBuckets,
}

impl FrequencyOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }
}

impl OrderPolicy for FrequencyOrder {
    fn on_insert<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        self.buckets.insert(arena, id);
    }

    fn on_access<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        self.buckets.touch(arena, id);
    }

    fn on_remove<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        self.buckets.remove(arena, id).is_some()
    }

    fn pick_victim(&self) -> Option<SlotId> {
        self.buckets.peek_min()
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }

    fn ids<T: FrequencyNode>(&self, _arena: &SlotArena<T>) -> Vec<SlotId> {
        self.buckets.iter().collect()
    }

    #[cfg(any(test, debug_assertions))]
    fn debug_validate_invariants<T: FrequencyNode>(&self, arena: &SlotArena<T>) {
        self.buckets.debug_validate_invariants(arena);
    }
}
