//! Single-threaded cache engine.
//!
//! `CacheCore` owns the entry store, the order index, the expiration
//! schedule and the counters, and keeps them consistent across every
//! operation. It never reads the clock: every time-dependent method takes
//! `now`, which keeps tests deterministic. [`Cache`](crate::cache::Cache)
//! wraps it in a mutex and supplies `Instant::now()`.
//!
//! ## Operation Flow
//!
//! ```text
//!   put_at(k, v, ttl, now)
//!   ═══════════════════════════════════════════════════════════════════
//!     k stored and live?
//!       yes ─► replace value + deadline, order.on_access
//!       no  ─► k stored but expired? ─► remove, expired += 1
//!              len == max_size?
//!                due expired entry in schedule? ─► remove, expired += 1
//!                else ─► order.pick_victim ─► remove, evictions += 1
//!              store.insert, order.on_insert, schedule deadline
//!
//!   get_at(k, now)
//!   ═══════════════════════════════════════════════════════════════════
//!     absent           ─► misses += 1
//!     expired          ─► remove, expired += 1, misses += 1
//!     live             ─► order.on_access, hits += 1
//! ```
//!
//! ## Invariants
//!
//! - store and order index hold exactly the same slots
//! - the order walk is sorted: by last access (LRU/MRU), by insert (FIFO),
//!   by frequency then insert (LFU)
//! - `len <= max_size` after every public call
//! - `total_requests == hits + misses`
//! - counters never decrease; `clear` keeps them

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::ds::slot_arena::SlotId;
use crate::error::{InvariantError, Result};
use crate::expiry::{self, ExpirationManager};
use crate::policy::{EvictionKind, OrderIndex, OrderPolicy};
use crate::stats::{CacheStats, StatsSnapshot};
use crate::store::{Entry, EntryStore};

/// Metadata view of one live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    /// Time since the key was first stored.
    pub age: Duration,
    /// Remaining lifetime; `None` if the entry never expires.
    pub expires_in: Option<Duration>,
    /// Hits plus in-place updates since insertion.
    pub access_count: u64,
    /// LFU frequency; `None` under the other policies.
    pub frequency: Option<u64>,
}

#[derive(Debug)]
pub struct CacheCore<K, V> {
    store: EntryStore<K, V>,
    order: OrderIndex,
    expiry: ExpirationManager,
    stats: CacheStats,
    max_size: usize,
}

impl<K, V> CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// Fails with [`CacheError::InvalidArgument`](crate::CacheError) when
    /// `max_size` is 0.
    pub fn new(max_size: usize, strategy: EvictionKind) -> Result<Self> {
        Self::from_config(CacheConfig::new(max_size, strategy))
    }

    pub fn from_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CacheConfig) -> Self {
        debug!(
            max_size = config.max_size,
            strategy = %config.eviction_strategy,
            "cache created"
        );
        Self {
            store: EntryStore::with_capacity(config.max_size),
            order: OrderIndex::new(config.eviction_strategy),
            expiry: ExpirationManager::new(),
            stats: CacheStats::new(),
            max_size: config.max_size,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    #[inline]
    pub fn strategy(&self) -> EvictionKind {
        self.order.kind()
    }

    /// Stored entries, including expired ones not yet swept.
    #[inline]
    pub fn stored_len(&self) -> usize {
        self.store.len()
    }

    /// Inserts or replaces `key`. `ttl = None` never expires.
    ///
    /// Returns the previous value when a live entry was replaced.
    pub fn put_at(&mut self, key: K, value: V, ttl: Option<Duration>, now: Instant) -> Option<V> {
        let expires_at = expiry::deadline(now, ttl);

        if let Some(id) = self.store.slot_of(&key) {
            let expired = self.store.get(id).is_some_and(|entry| entry.is_expired(now));
            if !expired {
                return self.update_live(id, value, expires_at);
            }
            self.expire_slot(id);
        }

        if self.store.len() >= self.max_size {
            self.make_room(now);
        }

        let seq = self.store.next_seq();
        let id = self
            .store
            .insert(Entry::new(key, value, now, expires_at, seq));
        self.order.on_insert(self.store.arena_mut(), id);
        self.expiry.schedule(id, expires_at);
        self.expiry.maybe_compact(&self.store);
        None
    }

    /// Looks up `key`, counting a hit or a miss.
    ///
    /// A hit refreshes the entry's position in the order index. An expired
    /// entry is removed and reported as a miss.
    pub fn get_at<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(id) = self.store.slot_of(key) else {
            self.stats.record_miss();
            return None;
        };
        if self.store.get(id).is_some_and(|entry| entry.is_expired(now)) {
            self.expire_slot(id);
            self.stats.record_miss();
            return None;
        }

        let seq = self.store.next_seq();
        match self.store.get_mut(id) {
            Some(entry) => entry.record_access(seq),
            None => {
                self.stats.record_miss();
                return None;
            },
        }
        self.order.on_access(self.store.arena_mut(), id);
        self.stats.record_hit();
        self.store.get(id).map(Entry::value)
    }

    /// Removes `key`. Returns `true` only if a live entry was removed.
    ///
    /// An expired but unswept entry is removed as expired and reported
    /// absent.
    pub fn delete_at<Q>(&mut self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(id) = self.store.slot_of(key) else {
            return false;
        };
        if self.store.get(id).is_some_and(|entry| entry.is_expired(now)) {
            self.expire_slot(id);
            return false;
        }
        self.remove_slot(id).is_some()
    }

    /// Live-entry check with no counter or ordering side effects.
    pub fn contains_at<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.live_entry(key, now).is_some()
    }

    /// Reads a live value without counting or reordering.
    pub fn peek_at<Q>(&self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.live_entry(key, now).map(Entry::value)
    }

    pub fn entry_info_at<Q>(&self, key: &Q, now: Instant) -> Option<EntryInfo>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let lfu = self.strategy() == EvictionKind::Lfu;
        self.live_entry(key, now).map(|entry| EntryInfo {
            age: now.saturating_duration_since(entry.inserted_at()),
            expires_in: entry.expires_in(now),
            access_count: entry.access_count(),
            frequency: lfu.then(|| entry.frequency()),
        })
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        let dropped = self.store.len();
        self.order.clear();
        self.expiry.clear();
        self.store.clear();
        debug!(dropped, "cache cleared");
    }

    /// Removes every entry whose deadline has passed; returns how many.
    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while let Some(id) = self.expiry.pop_due(&self.store, now) {
            self.expire_slot(id);
            removed += 1;
        }
        self.expiry.maybe_compact(&self.store);
        if removed > 0 {
            debug!(removed, remaining = self.store.len(), "expired entries swept");
        }
        removed
    }

    /// Live entry count, after sweeping expired entries.
    pub fn len_at(&mut self, now: Instant) -> usize {
        self.cleanup_expired_at(now);
        self.store.len()
    }

    /// Live keys from coldest to hottest, after sweeping expired entries.
    pub fn keys_at(&mut self, now: Instant) -> Vec<K> {
        self.cleanup_expired_at(now);
        self.order
            .ids(self.store.arena())
            .into_iter()
            .filter_map(|id| self.store.get(id).map(|entry| entry.key().clone()))
            .collect()
    }

    /// Counter snapshot, after sweeping expired entries.
    pub fn stats_at(&mut self, now: Instant) -> StatsSnapshot {
        self.cleanup_expired_at(now);
        self.stats.snapshot(self.store.len())
    }

    /// Verifies that store, order index and counters agree.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        let len = self.store.len();
        if self.store.index_len() != len {
            return Err(InvariantError::new(format!(
                "key index holds {} keys but store holds {} entries",
                self.store.index_len(),
                len
            )));
        }
        if self.order.len() != len {
            return Err(InvariantError::new(format!(
                "order index holds {} slots but store holds {} entries",
                self.order.len(),
                len
            )));
        }
        if len > self.max_size {
            return Err(InvariantError::new(format!(
                "{len} entries exceed max_size {}",
                self.max_size
            )));
        }

        let ids = self.order.ids(self.store.arena());
        if ids.len() != len {
            return Err(InvariantError::new(format!(
                "order walk visited {} slots, expected {len}",
                ids.len()
            )));
        }
        let mut seen = FxHashSet::default();
        let mut previous: Option<(u64, u64)> = None;
        for id in ids {
            if !self.store.is_indexed(id) {
                return Err(InvariantError::new(format!(
                    "order index references unindexed slot {}",
                    id.index()
                )));
            }
            if !seen.insert(id) {
                return Err(InvariantError::new(format!(
                    "slot {} appears twice in the order index",
                    id.index()
                )));
            }
            if let Some(entry) = self.store.get(id) {
                let position = self.order_position(entry);
                if previous.is_some_and(|prev| prev >= position) {
                    return Err(InvariantError::new(format!(
                        "slot {} is out of {} order",
                        id.index(),
                        self.strategy()
                    )));
                }
                previous = Some(position);
            }
        }

        let lfu = self.strategy() == EvictionKind::Lfu;
        for (id, entry) in self.store.iter() {
            if lfu == (entry.frequency() == 0) {
                return Err(InvariantError::new(format!(
                    "slot {} has frequency {} under {}",
                    id.index(),
                    entry.frequency(),
                    self.strategy()
                )));
            }
        }

        let stats = &self.stats;
        if stats.total_requests() != stats.hits().saturating_add(stats.misses()) {
            return Err(InvariantError::new("total_requests != hits + misses"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants(self.store.arena());
        if let Err(err) = self.check_invariants() {
            panic!("cache invariant violated: {err}");
        }
    }

    /// Sort key the order index must walk in strictly ascending order.
    fn order_position(&self, entry: &Entry<K, V>) -> (u64, u64) {
        match self.strategy() {
            EvictionKind::Lru | EvictionKind::Mru => (0, entry.last_access_seq()),
            EvictionKind::Fifo => (0, entry.insert_seq()),
            EvictionKind::Lfu => (entry.frequency(), entry.insert_seq()),
        }
    }

    fn live_entry<Q>(&self, key: &Q, now: Instant) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.store.slot_of(key)?;
        self.store.get(id).filter(|entry| !entry.is_expired(now))
    }

    fn update_live(&mut self, id: SlotId, value: V, expires_at: Option<Instant>) -> Option<V> {
        let seq = self.store.next_seq();
        let entry = self.store.get_mut(id)?;
        let previous = entry.replace(value, expires_at);
        entry.record_access(seq);
        self.order.on_access(self.store.arena_mut(), id);
        self.expiry.schedule(id, expires_at);
        self.expiry.maybe_compact(&self.store);
        Some(previous)
    }

    /// Frees one slot for an insert at capacity.
    ///
    /// A due expired entry is reclaimed before any live entry is evicted.
    fn make_room(&mut self, now: Instant) {
        if let Some(id) = self.expiry.pop_due(&self.store, now) {
            self.expire_slot(id);
            return;
        }
        let Some(victim) = self.order.pick_victim() else {
            debug_assert!(false, "full cache with an empty order index");
            return;
        };
        if self.remove_slot(victim).is_some() {
            self.stats.record_eviction();
            trace!(
                slot = victim.index(),
                strategy = %self.strategy(),
                "evicted entry"
            );
        }
    }

    fn expire_slot(&mut self, id: SlotId) {
        if self.remove_slot(id).is_some() {
            self.stats.record_expired(1);
            trace!(slot = id.index(), "removed expired entry");
        }
    }

    fn remove_slot(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        self.order.on_remove(self.store.arena_mut(), id);
        self.store.remove(id)
    }
}

impl<K, V> Default for CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// 100 entries, LRU.
    fn default() -> Self {
        Self::with_valid_config(CacheConfig::default())
    }
}
