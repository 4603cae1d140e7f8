//! Recency order shared by LRU and MRU.
//!
//! One intrusive list, least recent at the front, most recent at the back.
//! Inserts and accesses move a slot to the back. The two policies differ
//! only in which end they evict from:
//!
//! ```text
//!   front ─► [a] ◄──► [b] ◄──► [c] ◄── back
//!            LRU victim          MRU victim
//! ```

use crate::ds::frequency_buckets::FrequencyNode;
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::policy::OrderPolicy;

/// Which end of the recency list is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VictimEnd {
    LeastRecent,
    MostRecent,
}

#[derive(Debug)]
pub struct RecencyOrder {
    list: IntrusiveList,
    victim_end: VictimEnd,
}

impl RecencyOrder {
    pub fn lru() -> Self {
        Self {
            list: IntrusiveList::new(),
            victim_end: VictimEnd::LeastRecent,
        }
    }

    pub fn mru() -> Self {
        Self {
            list: IntrusiveList::new(),
            victim_end: VictimEnd::MostRecent,
        }
    }
}

impl OrderPolicy for RecencyOrder {
    fn on_insert<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        self.list.push_back(arena, id);
    }

    fn on_access<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        self.list.move_to_back(arena, id);
    }

    fn on_remove<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        self.list.unlink(arena, id)
    }

    fn pick_victim(&self) -> Option<SlotId> {
        match self.victim_end {
            VictimEnd::LeastRecent => self.list.front(),
            VictimEnd::MostRecent => self.list.back(),
        }
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear();
    }

    fn ids<T: FrequencyNode>(&self, arena: &SlotArena<T>) -> Vec<SlotId> {
        self.list.iter(arena).collect()
    }

    #[cfg(any(test, debug_assertions))]
    fn debug_validate_invariants<T: FrequencyNode>(&self, arena: &SlotArena<T>) {
        self.list.debug_validate_invariants(arena);
    }
}
