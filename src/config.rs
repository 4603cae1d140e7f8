//! Construction options.

use crate::error::{CacheError, Result};
use crate::policy::EvictionKind;

/// Capacity and eviction policy, fixed for the life of a cache.
///
/// ```
/// use boundcache::{CacheConfig, EvictionKind};
///
/// let config = CacheConfig::default();
/// assert_eq!(config.max_size, 100);
/// assert_eq!(config.eviction_strategy, EvictionKind::Lru);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub max_size: usize,
    pub eviction_strategy: EvictionKind,
}

impl CacheConfig {
    pub const DEFAULT_MAX_SIZE: usize = 100;

    pub fn new(max_size: usize, eviction_strategy: EvictionKind) -> Self {
        Self {
            max_size,
            eviction_strategy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::invalid("max_size must be greater than 0"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE, EvictionKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = CacheConfig::new(0, EvictionKind::Fifo).validate().unwrap_err();
        assert!(err.to_string().contains("max_size"));
        assert!(CacheConfig::new(1, EvictionKind::Fifo).validate().is_ok());
    }

    #[test]
    fn default_is_valid() {
        assert!(CacheConfig::default().validate().is_ok());
    }
}
