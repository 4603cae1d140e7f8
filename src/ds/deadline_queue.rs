//! Lazy min-heap of expiration deadlines.
//!
//! Records are `(deadline, seq, SlotId)` triples ordered by deadline, with a
//! monotonic sequence number breaking ties in push order. The queue never
//! deletes records in place: when an entry's deadline changes or the entry
//! goes away, the old record simply stops matching and is skipped by the
//! caller-supplied liveness check on pop.
//!
//! ```text
//!   heap (min first)                     store says
//!   ┌──────────────────────────────┐
//!   │ (t=10, seq=4, id_3)          │ ──► id_3.expires_at == t10   live
//!   │ (t=12, seq=1, id_0)          │ ──► id_0.expires_at == t30   stale
//!   │ (t=15, seq=2, id_7)          │ ──► slot 7 empty             stale
//!   │ (t=30, seq=5, id_0)          │ ──► id_0.expires_at == t30   live
//!   └──────────────────────────────┘
//! ```
//!
//! Stale records accumulate until [`DeadlineQueue::rebuild`] replaces the
//! heap with one record per live deadline.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::ds::slot_arena::SlotId;

#[derive(Debug, Clone, Copy)]
struct Record {
    deadline: Instant,
    seq: u64,
    id: SlotId,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of `(deadline, SlotId)` with lazy invalidation.
#[derive(Debug, Default)]
pub struct DeadlineQueue {
    heap: BinaryHeap<Reverse<Record>>,
    seq: u64,
}

impl DeadlineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, stale ones included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Schedules `id` to come due at `deadline`.
    pub fn push(&mut self, id: SlotId, deadline: Instant) {
        let record = Record {
            deadline,
            seq: self.seq,
            id,
        };
        self.seq = self.seq.wrapping_add(1);
        self.heap.push(Reverse(record));
    }

    /// Earliest record, live or not.
    pub fn peek(&self) -> Option<(SlotId, Instant)> {
        self.heap
            .peek()
            .map(|Reverse(record)| (record.id, record.deadline))
    }

    /// Pops the earliest record whose deadline is `<= now` and which
    /// `is_live` accepts. Stale due records are discarded on the way.
    pub fn pop_due<F>(&mut self, now: Instant, mut is_live: F) -> Option<SlotId>
    where
        F: FnMut(SlotId, Instant) -> bool,
    {
        loop {
            let (id, deadline) = self.peek()?;
            if deadline > now {
                return None;
            }
            self.heap.pop();
            if is_live(id, deadline) {
                return Some(id);
            }
        }
    }

    /// Replaces every record with the given live `(id, deadline)` pairs.
    pub fn rebuild<I>(&mut self, live: I)
    where
        I: IntoIterator<Item = (SlotId, Instant)>,
    {
        self.heap.clear();
        for (id, deadline) in live {
            self.push(id, deadline);
        }
    }

    /// `true` once stale records outnumber live ones by `factor` (plus `floor`).
    pub fn needs_rebuild(&self, live: usize, factor: usize, floor: usize) -> bool {
        self.heap.len() > live.saturating_mul(factor.max(1)).saturating_add(floor)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
