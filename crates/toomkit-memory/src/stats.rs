//! Arena usage counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters of one arena, or a snapshot of the process-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Scopes opened.
    pub scopes: u64,
    /// Largest number of bytes held when a scope closed.
    pub peak_bytes: u64,
}

/// Process-wide counters, updated from every thread.
pub struct AtomicArenaStats {
    scopes: AtomicU64,
    peak_bytes: AtomicU64,
}

impl AtomicArenaStats {
    /// Create zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scopes: AtomicU64::new(0),
            peak_bytes: AtomicU64::new(0),
        }
    }

    /// Count one opened scope.
    pub fn record_scope(&self) {
        self.scopes.fetch_add(1, Ordering::Relaxed);
    }

    /// Raise the peak to `bytes` if larger.
    pub fn record_peak(&self, bytes: u64) {
        self.peak_bytes.fetch_max(bytes, Ordering::Relaxed);
    }

    /// Take a snapshot of the counters.
    pub fn snapshot(&self) -> ArenaStats {
        ArenaStats {
            scopes: self.scopes.load(Ordering::Relaxed),
            peak_bytes: self.peak_bytes.load(Ordering::Relaxed),
        }
    }
}

impl Default for AtomicArenaStats {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: AtomicArenaStats = AtomicArenaStats::new();

/// Counters aggregated over all arenas in the process.
pub fn global_stats() -> &'static AtomicArenaStats {
    &GLOBAL
}
