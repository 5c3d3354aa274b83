//! Cache storage.
//!
//! A bounded LRU map of JSON payloads stamped with their insertion time.
//! Expiry is checked on read; the read that finds a stale entry evicts it.

use std::sync::Arc;
use std::sync::RwLock;

use lru::LruCache;
use metrics::counter;
use serde_json::Value;

use super::clock::{Clock, SystemClock};
use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

pub(crate) const METRIC_CACHE_HIT: &str = "foglio_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS: &str = "foglio_cache_miss_total";
pub(crate) const METRIC_CACHE_EVICT: &str = "foglio_cache_evict_total";
pub(crate) const METRIC_CACHE_INVALIDATE: &str = "foglio_cache_invalidate_total";

struct Entry {
    value: Value,
    stored_at: u64,
}

/// TTL read cache.
///
/// Constructed once at startup and shared; all state lives behind one lock.
pub struct TtlCache {
    entries: RwLock<LruCache<String, Entry>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl TtlCache {
    /// Create a cache on the process clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache on an injected clock.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(config.entry_limit_non_zero())),
            config,
            clock,
        }
    }

    /// Returns the payload while the entry is younger than the TTL.
    /// Finding an expired entry evicts it and reports a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.config.enable {
            return None;
        }

        let mut entries = rw_write(&self.entries, "get");
        let Some(entry) = entries.get(key) else {
            counter!(METRIC_CACHE_MISS).increment(1);
            return None;
        };

        let age = self.clock.now_ms().saturating_sub(entry.stored_at);
        let value = entry.value.clone();
        if age >= self.config.ttl_ms {
            entries.pop(key);
            counter!(METRIC_CACHE_EVICT).increment(1);
            counter!(METRIC_CACHE_MISS).increment(1);
            return None;
        }

        counter!(METRIC_CACHE_HIT).increment(1);
        Some(value)
    }

    /// Stores `value` stamped with the current time, replacing any prior
    /// entry for `key`.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        if !self.config.enable {
            return;
        }

        let key = key.into();
        let entry = Entry {
            value,
            stored_at: self.clock.now_ms(),
        };

        let mut entries = rw_write(&self.entries, "set");
        if let Some((evicted_key, _)) = entries.push(key.clone(), entry)
            && evicted_key != key
        {
            counter!(METRIC_CACHE_EVICT).increment(1);
        }
    }

    /// Removes one exact key. Returns whether an entry existed.
    pub fn remove(&self, key: &str) -> bool {
        let removed = rw_write(&self.entries, "remove").pop(key).is_some();
        if removed {
            counter!(METRIC_CACHE_INVALIDATE).increment(1);
        }
        removed
    }

    /// Removes every entry whose key starts with `prefix`, literally.
    /// Returns the number of entries removed.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = rw_write(&self.entries, "invalidate_prefix");
        let keys: Vec<String> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            entries.pop(key);
        }
        if !keys.is_empty() {
            counter!(METRIC_CACHE_INVALIDATE).increment(keys.len() as u64);
        }
        keys.len()
    }

    /// Drop all cached data.
    pub fn clear(&self) {
        rw_write(&self.entries, "clear").clear();
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
