//! Fluent construction for [`Cache`] and [`CacheCore`].
//!
//! ## Example
//!
//! ```rust
//! use boundcache::builder::CacheBuilder;
//! use boundcache::EvictionKind;
//!
//! let cache = CacheBuilder::new(100)
//!     .eviction_strategy(EvictionKind::Lfu)
//!     .build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//!
//! let by_name = CacheBuilder::new(10).strategy_name("fifo").unwrap();
//! assert_eq!(by_name.config().eviction_strategy, EvictionKind::Fifo);
//! ```

use std::hash::Hash;

use crate::cache::{Cache, CacheCore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::policy::EvictionKind;

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts from `max_size` with the default (LRU) strategy.
    pub fn new(max_size: usize) -> Self {
        Self {
            config: CacheConfig::new(max_size, EvictionKind::default()),
        }
    }

    pub fn eviction_strategy(mut self, strategy: EvictionKind) -> Self {
        self.config.eviction_strategy = strategy;
        self
    }

    /// Sets the strategy by name; unknown names fail.
    pub fn strategy_name(self, name: &str) -> Result<Self> {
        Ok(self.eviction_strategy(name.parse()?))
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Build a shared, thread-safe cache.
    pub fn build<K, V>(self) -> Result<Cache<K, V>>
    where
        K: Eq + Hash + Clone,
    {
        Cache::from_config(self.config)
    }

    /// Build the single-threaded engine.
    pub fn build_core<K, V>(self) -> Result<CacheCore<K, V>>
    where
        K: Eq + Hash + Clone,
    {
        CacheCore::from_config(self.config)
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self {
            config: CacheConfig::default(),
        }
    }
}

impl From<CacheConfig> for CacheBuilder {
    fn from(config: CacheConfig) -> Self {
        Self { config }
    }
}
