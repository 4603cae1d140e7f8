//! Cache front-end.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │ Cache<K, V>            (Clone; Arc<parking_lot::Mutex<..>>)      │
//!   │   reads Instant::now() under the lock                            │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │ CacheCore<K, V>                                          │   │
//!   │   │                                                          │   │
//!   │   │   EntryStore       FxHashMap<K, SlotId> + SlotArena      │   │
//!   │   │   OrderIndex       LRU | MRU | LFU | FIFO, links in Entry│   │
//!   │   │   ExpirationMgr    lazy deadline heap over SlotIds       │   │
//!   │   │   CacheStats       hits, misses, evictions, expired      │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Type        | Use                                              |
//! |-------------|--------------------------------------------------|
//! | `Cache`     | Shared handle; every call is atomic              |
//! | `CacheCore` | Owned engine; explicit `now`, no locking         |
//! | `EntryInfo` | Age / remaining TTL / access metadata of a key   |

pub mod engine;
pub mod shared;

pub use self::engine::{CacheCore, EntryInfo};
pub use self::shared::Cache;
