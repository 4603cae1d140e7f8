//! Slab-backed entry store keyed by `K` with stable [`SlotId`] handles.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          arena: SlotArena<Entry<K, V>>
//!   ┌──────────┬────────┐                ┌──────┬──────────────────────────┐
//!   │ "user:1" │  id_0  │ ─────────────► │ id_0 │ Entry { key, value, .. } │
//!   │ "user:2" │  id_2  │ ──────┐        │ id_1 │ (free)                   │
//!   └──────────┴────────┘       └──────► │ id_2 │ Entry { key, value, .. } │
//!                                        └──────┴──────────────────────────┘
//! ```
//!
//! The store owns every value. Order indices hold only `SlotId`s and reach
//! the embedded links through [`EntryStore::arena_mut`].

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::store::entry::Entry;

#[derive(Debug)]
pub struct EntryStore<K, V> {
    arena: SlotArena<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    seq: u64,
}

impl<K, V> EntryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            seq: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Advances and returns the store-wide insert/access sequence.
    pub fn next_seq(&mut self) -> u64 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    #[inline]
    pub fn slot_of<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).copied()
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.arena.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.arena.get_mut(id)
    }

    /// Stores a new entry. The key must not already be present.
    pub fn insert(&mut self, entry: Entry<K, V>) -> SlotId {
        let key = entry.key().clone();
        let id = self.arena.insert(entry);
        let previous = self.index.insert(key, id);
        debug_assert!(previous.is_none(), "key stored twice");
        id
    }

    /// Removes the entry at `id` and its index record.
    ///
    /// Callers unlink the slot from its order index first.
    pub fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        let entry = self.arena.remove(id)?;
        self.index.remove(entry.key());
        Some(entry)
    }

    /// Arena access for order indices threading links through entries.
    #[inline]
    pub fn arena(&self) -> &SlotArena<Entry<K, V>> {
        &self.arena
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut SlotArena<Entry<K, V>> {
        &mut self.arena
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Entry<K, V>)> {
        self.arena.iter()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
    }

    /// Whether `key` maps to `id` and back.
    pub fn is_indexed(&self, id: SlotId) -> bool {
        self.arena
            .get(id)
            .is_some_and(|entry| self.index.get(entry.key()) == Some(&id))
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }
}
