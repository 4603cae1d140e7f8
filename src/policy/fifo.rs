//! Insertion queue for FIFO eviction.
//!
//! Accesses never reorder the queue; the victim is always the oldest
//! inserted slot still present. Removal of an arbitrary slot (delete,
//! expiry) unlinks it in O(1), so the head is never a stale entry.

use crate::ds::frequency_buckets::FrequencyNode;
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::policy::OrderPolicy;

#[derive(Debug, Default)]
pub struct InsertionOrder {
    queue: IntrusiveList,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderPolicy for InsertionOrder {
    fn on_insert<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        self.queue.push_back(arena, id);
    }

    fn on_access<T: FrequencyNode>(&mut self, _arena: &mut SlotArena<T>, _id: SlotId) {}

    fn on_remove<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        self.queue.unlink(arena, id)
    }

    fn pick_victim(&self) -> Option<SlotId> {
        self.queue.front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn ids<T: FrequencyNode>(&self, arena: &SlotArena<T>) -> Vec<SlotId> {
        self.queue.iter(arena).collect()
    }

    #[cfg(any(test, debug_assertions))]
    fn debug_validate_invariants<T: FrequencyNode>(&self, arena: &SlotArena<T>) {
        self.queue.debug_validate_invariants(arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::intrusive_list::test_node::Node;

    #[test]
    fn access_does_not_reorder() {
        let mut arena = SlotArena::new();
        let mut order = InsertionOrder::new();
        let ids: Vec<_> = (0..3)
            .map(|v| {
                let id = arena.insert(Node::new(v));
                order.on_insert(&mut arena, id);
                id
            })
            .collect();

        order.on_access(&mut arena, ids[0]);
        order.on_access(&mut arena, ids[0]);
        assert_eq!(order.pick_victim(), Some(ids[0]));
        assert_eq!(order.ids(&arena), ids);
    }

    #[test]
    fn deleted_head_is_skipped() {
        let mut arena = SlotArena::new();
        let mut order = InsertionOrder::new();
        let a = arena.insert(Node::new(0));
        let b = arena.insert(Node::new(1));
        order.on_insert(&mut arena, a);
        order.on_insert(&mut arena, b);

        assert!(order.on_remove(&mut arena, a));
        assert_eq!(order.pick_victim(), Some(b));
        assert_eq!(order.len(), 1);
        order.debug_validate_invariants(&arena);
    }
}
