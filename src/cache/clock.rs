//! Clock seam for TTL checks.
//!
//! The store never reads wall time directly; it asks a [`Clock`] so expiry
//! is testable by advancing a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use once_cell::sync::Lazy;

static PROCESS_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

pub trait Clock: Send + Sync {
    /// Monotonic milliseconds. Only differences are meaningful.
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the first clock read of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(PROCESS_EPOCH.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
