//! Expiration: deadline arithmetic and the due-entry schedule.
//!
//! Expiry is lazy. Nothing runs in the background; an entry past its
//! deadline stays stored until a lookup touches it, capacity pressure needs
//! its slot, or a sweep drains the schedule.
//!
//! ## Schedule
//!
//! ```text
//!   put(k, ttl) ──► deadline = now + ttl ──► entry.expires_at
//!                                        └─► DeadlineQueue.push(id, deadline)
//!
//!   sweep(now):
//!     while queue.front().deadline <= now:
//!       record live?  (store[id].expires_at == record.deadline)
//!         yes ─► caller removes the entry, counts it expired
//!         no  ─► dropped (key deleted, evicted or re-put since)
//! ```
//!
//! Re-putting a key with a new TTL pushes a fresh record and leaves the old
//! one stale. Once stale records outnumber live entries the queue is rebuilt
//! from the store.

use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::ds::deadline_queue::DeadlineQueue;
use crate::ds::slot_arena::SlotId;
use crate::error::{CacheError, Result};
use crate::store::EntryStore;

const REBUILD_FACTOR: usize = 2;
const REBUILD_FLOOR: usize = 64;

/// `now + ttl`, or `None` (never expires) when no TTL is given or the sum
/// does not fit in an `Instant`.
pub fn deadline(now: Instant, ttl: Option<Duration>) -> Option<Instant> {
    ttl.and_then(|ttl| now.checked_add(ttl))
}

/// Converts a TTL in (possibly fractional) seconds.
///
/// Negative and NaN values are rejected. `+inf` and values too large for a
/// `Duration` mean the entry never expires.
pub fn ttl_from_secs(secs: f64) -> Result<Option<Duration>> {
    if secs.is_nan() || secs < 0.0 {
        return Err(CacheError::invalid(format!(
            "ttl must be a non-negative number of seconds, got {secs}"
        )));
    }
    Ok(Duration::try_from_secs_f64(secs).ok())
}

/// Due-entry schedule over the store's slots.
#[derive(Debug, Default)]
pub struct ExpirationManager {
    queue: DeadlineQueue,
}

impl ExpirationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records, stale ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn schedule(&mut self, id: SlotId, deadline: Option<Instant>) {
        if let Some(deadline) = deadline {
            self.queue.push(id, deadline);
        }
    }

    /// Next stored entry whose deadline is `<= now`, if any.
    pub fn pop_due<K, V>(&mut self, store: &EntryStore<K, V>, now: Instant) -> Option<SlotId>
    where
        K: Eq + Hash + Clone,
    {
        self.queue.pop_due(now, |id, deadline| {
            store
                .get(id)
                .is_some_and(|entry| entry.expires_at() == Some(deadline))
        })
    }

    /// Drops stale records once they dominate the queue.
    pub fn maybe_compact<K, V>(&mut self, store: &EntryStore<K, V>)
    where
        K: Eq + Hash + Clone,
    {
        let live = store.len();
        if !self.queue.needs_rebuild(live, REBUILD_FACTOR, REBUILD_FLOOR) {
            return;
        }
        self.queue.rebuild(
            store
                .iter()
                .filter_map(|(id, entry)| entry.expires_at().map(|deadline| (id, deadline))),
        );
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
