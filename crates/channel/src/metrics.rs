//! Channel metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one in-memory topic
#[derive(Debug, Default)]
pub struct ChannelMetrics {
    /// Total messages accepted for delivery
    published_count: AtomicU64,
    /// Total messages rejected because a partition queue was full
    rejected_count: AtomicU64,
    /// Total offsets committed by consumers
    committed_count: AtomicU64,
}

impl ChannelMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_count(&self) -> u64 {
        self.published_count.load(Ordering::Relaxed)
    }

    pub fn inc_published(&self) {
        self.published_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected_count.load(Ordering::Relaxed)
    }

    pub fn inc_rejected(&self) {
        self.rejected_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn committed_count(&self) -> u64 {
        self.committed_count.load(Ordering::Relaxed)
    }

    pub fn inc_committed(&self) {
        self.committed_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> ChannelSnapshot {
        ChannelSnapshot {
            published_count: self.published_count(),
            rejected_count: self.rejected_count(),
            committed_count: self.committed_count(),
        }
    }
}

/// Snapshot of channel counters (for reporting)
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelSnapshot {
    pub published_count: u64,
    pub rejected_count: u64,
    pub committed_count: u64,
}
