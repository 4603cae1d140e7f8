use std::time::{Duration, Instant};

use crate::ds::frequency_buckets::FrequencyNode;
use crate::ds::intrusive_list::{Linked, Links};

/// A cached value plus the metadata every policy and the expiry check read.
///
/// The entry is also its own order-index node: `links` threads it into the
/// recency/insertion list, while `freq` names its LFU bucket and the insert
/// sequence is its rank in that bucket. No other structure owns the value.
#[derive(Debug)]
pub struct Entry<K, V> {
    links: Links,
    freq: u64,
    key: K,
    value: V,
    inserted_at: Instant,
    expires_at: Option<Instant>,
    access_count: u64,
    seq: u64,
    last_access_seq: u64,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, now: Instant, expires_at: Option<Instant>, seq: u64) -> Self {
        Self {
            links: Links::default(),
            freq: 0,
            key,
            value,
            inserted_at: now,
            expires_at,
            access_count: 0,
            seq,
            last_access_seq: seq,
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// When the key was first stored; in-place updates keep the original time.
    #[inline]
    pub fn inserted_at(&self) -> Instant {
        self.inserted_at
    }

    #[inline]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Successful lookups and in-place updates since insertion.
    #[inline]
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Store sequence of the insert; in-place updates keep it.
    #[inline]
    pub(crate) fn insert_seq(&self) -> u64 {
        self.seq
    }

    /// Store sequence of the last insert, update or hit.
    #[inline]
    pub(crate) fn last_access_seq(&self) -> u64 {
        self.last_access_seq
    }

    /// LFU bucket frequency; 0 under the other policies.
    #[inline]
    pub fn frequency(&self) -> u64 {
        self.freq
    }

    /// `now >= expires_at`; entries without a deadline never expire.
    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    /// Remaining lifetime, `None` for entries that never expire.
    pub fn expires_in(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub(crate) fn replace(&mut self, value: V, expires_at: Option<Instant>) -> V {
        self.expires_at = expires_at;
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn record_access(&mut self, seq: u64) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_access_seq = seq;
    }
}

impl<K, V> Linked for Entry<K, V> {
    #[inline]
    fn links(&self) -> &Links {
        &self.links
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

impl<K, V> FrequencyNode for Entry<K, V> {
    #[inline]
    fn freq(&self) -> u64 {
        self.freq
    }

    #[inline]
    fn set_freq(&mut self, freq: u64) {
        self.freq = freq;
    }

    #[inline]
    fn rank(&self) -> u64 {
        self.seq
    }
}
