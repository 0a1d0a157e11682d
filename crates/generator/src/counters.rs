//! Generator counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters for one generator instance
#[derive(Debug, Default)]
pub struct GeneratorMetrics {
    /// Readings accepted by the channel
    published: AtomicU64,
    /// Publish attempts rejected or failed
    failed: AtomicU64,
}

impl GeneratorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Get snapshot
    pub fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot {
            published: self.published_count(),
            failed: self.failure_count(),
        }
    }
}

/// Snapshot of generator counters
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorSnapshot {
    pub published: u64,
    pub failed: u64,
}
