//! In-memory TTL cache with stale retention.
//!
//! Expired entries are kept rather than evicted: when every upstream provider
//! is down, a stale last-known-good answer labeled as cached beats an error.
//! Updates are idempotent last-write-wins, so the dashmap needs no extra
//! locking; a stale read racing a write is accepted behavior.

use dashmap::DashMap;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// A thread-safe key→value cache with per-entry TTL.
pub struct Cache<V> {
    data: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> Cache<V> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Get a value only if its TTL has not elapsed.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        (entry.expires_at > Instant::now()).then(|| entry.value.clone())
    }

    /// Get the last stored value regardless of TTL, with a freshness flag.
    pub fn get_stale(&self, key: &str) -> Option<(V, bool)> {
        let entry = self.data.get(key)?;
        let fresh = entry.expires_at > Instant::now();
        Some((entry.value.clone(), fresh))
    }

    /// Store a value with the given TTL, replacing any previous entry.
    pub fn set(&self, key: String, value: V, ttl: Duration) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&self) {
        self.data.clear();
    }
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}
