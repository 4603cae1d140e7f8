//! Thread-safe cache handle.
//!
//! Every operation takes one global `parking_lot::Mutex`, reads the clock
//! while holding it, and runs the corresponding [`CacheCore`] method. Reads
//! mutate (recency, frequency, lazy expiry, counters), so there is no
//! read-only lock path. Clones share the same cache.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::cache::engine::{CacheCore, EntryInfo};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::expiry;
use crate::policy::EvictionKind;
use crate::stats::StatsSnapshot;

/// Shared, capacity-bounded key-value cache.
///
/// # Example
///
/// ```
/// use boundcache::{Cache, EvictionKind};
/// use std::time::Duration;
///
/// let cache: Cache<String, String> = Cache::new(2, EvictionKind::Lru).unwrap();
/// cache.put("a".into(), "1".into());
/// cache.put("b".into(), "2".into());
/// assert_eq!(cache.get("a").as_deref(), Some("1"));
///
/// // "b" is now least recently used
/// cache.put("c".into(), "3".into());
/// assert!(!cache.contains("b"));
///
/// cache.put_with_ttl("session".into(), "x".into(), Duration::from_secs(60));
/// assert_eq!(cache.size(), 2);
/// assert_eq!(cache.stats().evictions, 2);
/// ```
pub struct Cache<K, V> {
    inner: Arc<Mutex<CacheCore<K, V>>>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("Cache")
            .field("stored", &core.stored_len())
            .field("capacity", &core.capacity())
            .field("strategy", &core.strategy())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// 100 entries, LRU.
    fn default() -> Self {
        Self::from_core(CacheCore::default())
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(max_size: usize, strategy: EvictionKind) -> Result<Self> {
        CacheCore::new(max_size, strategy).map(Self::from_core)
    }

    /// Like [`new`](Self::new) with the strategy given by name
    /// (`"lru"`, `"mru"`, `"lfu"`, `"fifo"`).
    pub fn with_strategy_name(max_size: usize, strategy: &str) -> Result<Self> {
        Self::new(max_size, strategy.parse()?)
    }

    pub fn from_config(config: CacheConfig) -> Result<Self> {
        CacheCore::from_config(config).map(Self::from_core)
    }

    pub fn from_core(core: CacheCore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(core)),
        }
    }

    /// Inserts a value that never expires. Returns the replaced live value.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.put_opt(key, value, None)
    }

    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) -> Option<V> {
        self.put_opt(key, value, Some(ttl))
    }

    /// TTL in seconds. Negative or NaN fails with `InvalidArgument` and
    /// leaves the cache untouched; `+inf` never expires.
    pub fn put_with_ttl_secs(&self, key: K, value: V, ttl_secs: f64) -> Result<Option<V>> {
        let ttl = expiry::ttl_from_secs(ttl_secs)?;
        Ok(self.put_opt(key, value, ttl))
    }

    pub fn put_opt(&self, key: K, value: V, ttl: Option<Duration>) -> Option<V> {
        let mut core = self.inner.lock();
        core.put_at(key, value, ttl, Instant::now())
    }

    /// Returns a clone of the live value, counting a hit or a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Like [`get`](Self::get) but maps the value under the lock instead of
    /// cloning it.
    pub fn get_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut core = self.inner.lock();
        core.get_at(key, Instant::now()).map(f)
    }

    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut core = self.inner.lock();
        core.delete_at(key, Instant::now())
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().contains_at(key, Instant::now())
    }

    pub fn entry_info<Q>(&self, key: &Q) -> Option<EntryInfo>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().entry_info_at(key, Instant::now())
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Live entries; sweeps expired ones first.
    pub fn size(&self) -> usize {
        let mut core = self.inner.lock();
        core.len_at(Instant::now())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Live keys from coldest to hottest; sweeps expired ones first.
    pub fn keys(&self) -> Vec<K> {
        let mut core = self.inner.lock();
        core.keys_at(Instant::now())
    }

    pub fn stats(&self) -> StatsSnapshot {
        let mut core = self.inner.lock();
        core.stats_at(Instant::now())
    }

    /// Removes every expired entry; returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut core = self.inner.lock();
        core.cleanup_expired_at(Instant::now())
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn strategy(&self) -> EvictionKind {
        self.inner.lock().strategy()
    }

    /// Runs `f` with the core locked, for callers that need several steps
    /// to happen atomically.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut CacheCore<K, V>) -> R) -> R {
        let mut core = self.inner.lock();
        f(&mut core)
    }
}
