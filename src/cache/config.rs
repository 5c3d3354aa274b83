//! Cache configuration.

use std::num::NonZeroUsize;

use serde::Deserialize;

// Default values for cache configuration
const DEFAULT_TTL_MS: u64 = 300_000;
const DEFAULT_ENTRY_LIMIT: usize = 256;

/// Cache configuration from `foglio.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the read cache. A disabled cache misses every read and drops
    /// every write.
    pub enable: bool,
    /// Entry lifetime in milliseconds.
    pub ttl_ms: u64,
    /// Maximum number of cached payloads.
    pub entry_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable: true,
            ttl_ms: DEFAULT_TTL_MS,
            entry_limit: DEFAULT_ENTRY_LIMIT,
        }
    }
}

impl CacheConfig {
    /// Returns the entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn entry_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.entry_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
