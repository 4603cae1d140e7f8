//! Eviction policies and their order indices.
//!
//! The policy is chosen once at construction and never changes. Each
//! variant carries its own index state over the entry arena:
//!
//! | Policy | Index            | `on_access`           | Victim                          |
//! |--------|------------------|-----------------------|---------------------------------|
//! | LRU    | recency list     | move to most-recent   | least-recent end                |
//! | MRU    | recency list     | move to most-recent   | most-recent end                 |
//! | LFU    | frequency chain  | freq+1, next bucket   | oldest insert in `min_freq`     |
//! | FIFO   | insertion queue  | no-op                 | oldest insertion                |
//!
//! [`OrderIndex`] is a closed enum; every call dispatches with a `match`.

pub mod fifo;
pub mod lfu;
pub mod recency;

use std::fmt;
use std::str::FromStr;

use crate::ds::frequency_buckets::FrequencyNode;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::CacheError;

pub use fifo::InsertionOrder;
pub use lfu::FrequencyOrder;
pub use recency::RecencyOrder;

/// The closed set of eviction strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EvictionKind {
    /// Least recently used.
    #[default]
    Lru,
    /// Most recently used.
    Mru,
    /// Least frequently used.
    Lfu,
    /// First in, first out.
    Fifo,
}

impl EvictionKind {
    pub const ALL: [EvictionKind; 4] = [Self::Lru, Self::Mru, Self::Lfu, Self::Fifo];

    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Mru => "mru",
            Self::Lfu => "lfu",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for EvictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                CacheError::invalid(format!(
                    "unknown eviction_strategy {s:?} (expected one of lru, mru, lfu, fifo)"
                ))
            })
    }
}

/// Capability set every order index provides over the entry arena.
pub trait OrderPolicy {
    /// A new slot entered the cache.
    fn on_insert<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId);

    /// A live slot was read or overwritten.
    fn on_access<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId);

    /// A slot is leaving the cache; call before the arena frees it.
    fn on_remove<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool;

    /// The slot this policy would evict next.
    fn pick_victim(&self) -> Option<SlotId>;

    fn len(&self) -> usize;

    fn clear(&mut self);

    /// Member slots from coldest to hottest.
    fn ids<T: FrequencyNode>(&self, arena: &SlotArena<T>) -> Vec<SlotId>;

    #[cfg(any(test, debug_assertions))]
    fn debug_validate_invariants<T: FrequencyNode>(&self, arena: &SlotArena<T>);
}

/// Policy-specific order index, one variant per [`EvictionKind`].
#[derive(Debug)]
pub enum OrderIndex {
    Lru(RecencyOrder),
    Mru(RecencyOrder),
    Lfu(FrequencyOrder),
    Fifo(InsertionOrder),
}

impl OrderIndex {
    pub fn new(kind: EvictionKind) -> Self {
        match kind {
            EvictionKind::Lru => Self::Lru(RecencyOrder::lru()),
            EvictionKind::Mru => Self::Mru(RecencyOrder::mru()),
            EvictionKind::Lfu => Self::Lfu(FrequencyOrder::new()),
            EvictionKind::Fifo => Self::Fifo(InsertionOrder::new()),
        }
    }

    pub fn kind(&self) -> EvictionKind {
        match self {
            Self::Lru(_) => EvictionKind::Lru,
            Self::Mru(_) => EvictionKind::Mru,
            Self::Lfu(_) => EvictionKind::Lfu,
            Self::Fifo(_) => EvictionKind::Fifo,
        }
    }
}

impl OrderPolicy for OrderIndex {
    fn on_insert<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.on_insert(arena, id),
            Self::Lfu(order) => order.on_insert(arena, id),
            Self::Fifo(order) => order.on_insert(arena, id),
        }
    }

    fn on_access<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.on_access(arena, id),
            Self::Lfu(order) => order.on_access(arena, id),
            Self::Fifo(order) => order.on_access(arena, id),
        }
    }

    fn on_remove<T: FrequencyNode>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.on_remove(arena, id),
            Self::Lfu(order) => order.on_remove(arena, id),
            Self::Fifo(order) => order.on_remove(arena, id),
        }
    }

    fn pick_victim(&self) -> Option<SlotId> {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.pick_victim(),
            Self::Lfu(order) => order.pick_victim(),
            Self::Fifo(order) => order.pick_victim(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.len(),
            Self::Lfu(order) => order.len(),
            Self::Fifo(order) => order.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.clear(),
            Self::Lfu(order) => order.clear(),
            Self::Fifo(order) => order.clear(),
        }
    }

    fn ids<T: FrequencyNode>(&self, arena: &SlotArena<T>) -> Vec<SlotId> {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.ids(arena),
            Self::Lfu(order) => order.ids(arena),
            Self::Fifo(order) => order.ids(arena),
        }
    }

    #[cfg(any(test, debug_assertions))]
    fn debug_validate_invariants<T: FrequencyNode>(&self, arena: &SlotArena<T>) {
        match self {
            Self::Lru(order) | Self::Mru(order) => order.debug_validate_invariants(arena),
            Self::Lfu(order) => order.debug_validate_invariants(arena),
            Self::Fifo(order) => order.debug_validate_invariants(arena),
        }
    }
}
