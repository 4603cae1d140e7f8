//! Intrusive doubly linked list over an external [`SlotArena`].
//!
//! The list owns only `head`, `tail` and `len`. The `prev`/`next` links live
//! inside the arena values themselves (any `T: Linked`), so one arena slot is
//! both the stored entry and its list node. Several lists may share one arena
//! as long as every value is a member of at most one list at a time.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<T: Linked>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ T { .., links: Links { prev, next } }        │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ id_0   │ { A, prev: None,       next: Some(id_2) }    │
//!   │ id_1   │ { X, (member of another list)            }   │
//!   │ id_2   │ { B, prev: Some(id_0), next: None }          │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   front ─► [id_0] ◄──► [id_2] ◄── back
//!   (coldest)                (hottest)
//! ```
//!
//! ## Operations
//! - `push_back(id)`: attach at the back
//! - `move_to_back(id)`: detach + attach at the back
//! - `unlink(id)`: detach, leaving the arena slot untouched
//!
//! All operations are O(1) except `iter` and `debug_validate_invariants`.

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Neighbor links embedded in an arena value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Links {
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl Links {
    pub fn prev(&self) -> Option<SlotId> {
        self.prev
    }

    pub fn next(&self) -> Option<SlotId> {
        self.next
    }

    fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// A value that carries its own [`Links`].
pub trait Linked {
    fn links(&self) -> &Links;
    fn links_mut(&mut self) -> &mut Links;
}

/// Head/tail bookkeeping for a list whose nodes live in a shared arena.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IntrusiveList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl IntrusiveList {
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

    /// Oldest / coldest node.
    #[inline]
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Newest / hottest node.
    #[inline]
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Appends `id` at the back. `id` must not already be linked into a list.
    pub fn push_back<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        let old_tail = self.tail;
        match arena.get_mut(id) {
            Some(value) => {
                let links = value.links_mut();
                debug_assert!(links.is_detached());
                links.prev = old_tail;
                links.next = None;
            },
            None => return false,
        }
        match old_tail.and_then(|tail| arena.get_mut(tail)) {
            Some(tail) => tail.links_mut().next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        true
    }

    /// Detaches `id` from this list. The arena slot is left in place.
    ///
    /// The caller guarantees `id` is a member of this list; links of a node
    /// in a different list would be corrupted.
    pub fn unlink<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        let Some(links) = arena.get(id).map(|value| *value.links()) else {
            return false;
        };
        if links.is_detached() && self.head != Some(id) {
            return false;
        }

        match links.prev.and_then(|prev| arena.get_mut(prev)) {
            Some(prev) => prev.links_mut().next = links.next,
            None => self.head = links.next,
        }
        match links.next.and_then(|next| arena.get_mut(next)) {
            Some(next) => next.links_mut().prev = links.prev,
            None => self.tail = links.prev,
        }
        if let Some(value) = arena.get_mut(id) {
            *value.links_mut() = Links::default();
        }
        self.len -= 1;
        true
    }

    /// Moves a member node to the back.
    pub fn move_to_back<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return arena.contains(id);
        }
        self.unlink(arena, id) && self.push_back(arena, id)
    }

    /// Forgets all members without touching the arena.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Iterates member ids from front to back.
    pub fn iter<'a, T: Linked>(&self, arena: &'a SlotArena<T>) -> IntrusiveListIter<'a, T> {
        IntrusiveListIter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<T: Linked>(&self, arena: &SlotArena<T>) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let links = arena.get(id).expect("list node missing from arena").links();
            assert_eq!(links.prev, prev, "broken back link at {id:?}");
            prev = Some(id);
            current = links.next;
            count += 1;
            assert!(count <= self.len, "list longer than recorded len");
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len);
    }
}

pub struct IntrusiveListIter<'a, T> {
    arena: &'a SlotArena<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<T: Linked> Iterator for IntrusiveListIter<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.arena.get(id).and_then(|value| value.links().next);
        self.remaining = self.remaining.saturating_sub(1);
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
pub(crate) mod test_node {
    use super::{Linked, Links};
    use crate::ds::frequency_buckets::FrequencyNode;

    /// Minimal arena value for exercising list code in isolation.
    #[derive(Debug, Default)]
    pub struct Node {
        pub value: u32,
        pub links: Links,
        pub freq: u64,
        pub rank: u64,
    }

    impl Node {
        /// Rank follows `value`, so nodes built in value order tie-break
        /// in that order.
        pub fn new(value: u32) -> Self {
            Self {
                value,
                rank: u64::from(value),
                ..Self::default()
            }
        }
    }

    impl Linked for Node {
        fn links(&self) -> &Links {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links {
            &mut self.links
        }
    }

    impl FrequencyNode for Node {
        fn freq(&self) -> u64 {
            self.freq
        }

        fn set_freq(&mut self, freq: u64) {
            self.freq = freq;
        }

        fn rank(&self) -> u64 {
            self.rank
        }
    }
}
