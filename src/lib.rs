//! boundcache: a capacity-bounded in-process key-value cache.
//!
//! One cache holds at most `max_size` entries and evicts by a policy fixed
//! at construction: LRU, MRU, LFU or FIFO. Entries may carry a time-to-live;
//! expiry is lazy (checked on access, under capacity pressure and by
//! sweeps). Hits, misses, evictions and expirations are counted. All
//! operations on a [`Cache`] run under one lock.
//!
//! ```
//! use boundcache::prelude::*;
//!
//! let cache: Cache<&str, u32> = Cache::new(2, EvictionKind::Fifo).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get("a");
//! cache.put("c", 3);
//! assert_eq!(cache.keys(), ["b", "c"]);
//! ```
//!
//! Module map: `ds` holds the arena-backed structures, `store` the entries,
//! `policy` the order indices, `expiry` the deadline schedule, `stats` the
//! counters and `cache` the engine plus its thread-safe handle.

pub mod builder;
pub mod cache;
pub mod config;
pub mod ds;
pub mod error;
pub mod expiry;
pub mod policy;
pub mod prelude;
pub mod stats;
pub mod store;

pub use crate::builder::CacheBuilder;
pub use crate::cache::{Cache, CacheCore, EntryInfo};
pub use crate::config::CacheConfig;
pub use crate::error::{CacheError, InvariantError, Result};
pub use crate::policy::EvictionKind;
pub use crate::stats::StatsSnapshot;
