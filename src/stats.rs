//! Hit/miss/eviction/expiry counters.
//!
//! Counters are plain integers mutated only under the cache guard. They are
//! monotonic for the life of the cache; `clear()` does not reset them.
//! Derived values (`total_requests`, `hit_rate`) are computed at snapshot
//! time.

use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
    expired: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions = self.evictions.saturating_add(1);
    }

    #[inline]
    pub fn record_expired(&mut self, count: u64) {
        self.expired = self.expired.saturating_add(count);
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    pub fn expired(&self) -> u64 {
        self.expired
    }

    /// Every `get` is exactly one hit or one miss.
    pub fn total_requests(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    pub fn snapshot(&self, current_size: usize) -> StatsSnapshot {
        let total_requests = self.total_requests();
        let hit_rate = if total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / total_requests as f64
        };
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            expired: self.expired,
            total_requests,
            hit_rate,
            current_size,
        }
    }
}

/// Point-in-time copy of the counters plus the live entry count.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    /// Entries removed to make room for an insert.
    pub evictions: u64,
    /// Entries removed because their deadline passed.
    pub expired: u64,
    pub total_requests: u64,
    /// `hits / total_requests`, `0.0` before the first lookup.
    pub hit_rate: f64,
    pub current_size: usize,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} evictions={} expired={} total_requests={} hit_rate={:.3} current_size={}",
            self.hits,
            self.misses,
            self.evictions,
            self.expired,
            self.total_requests,
            self.hit_rate,
            self.current_size,
        )
    }
}
