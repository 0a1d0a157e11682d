//! Runner counters for observability

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use observability::{RunningStats, StatsSummary};

/// Shared counters for one runner instance.
///
/// Updated by every partition worker; concurrent-set semantics only, no
/// cross-counter consistency.
#[derive(Debug, Default)]
pub struct RunnerCounters {
    /// Messages delivered to workers
    consumed: AtomicU64,
    /// Payloads that failed to parse
    malformed: AtomicU64,
    /// Successful store writes
    persisted: AtomicU64,
    /// Failed or timed-out store writes
    persist_failures: AtomicU64,
    /// Classifier calls that failed (transport or protocol)
    classifier_failures: AtomicU64,
    /// Readings the classifier flagged
    anomalies: AtomicU64,
    /// Alert dispatches that succeeded
    alerts_sent: AtomicU64,
    /// Alert dispatches that failed
    alert_failures: AtomicU64,
    /// Observed normalized frequencies
    frequency_stats: Mutex<RunningStats>,
}

impl RunnerCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_consumed(&self) {
        self.consumed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persisted(&self) {
        self.persisted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persist_failure(&self) {
        self.persist_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_classifier_failure(&self) {
        self.classifier_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_anomaly(&self) {
        self.anomalies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert_sent(&self) {
        self.alerts_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert_failure(&self) {
        self.alert_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_frequency(&self, hertz: f64) {
        self.frequency_stats
            .lock()
            .expect("stats lock poisoned")
            .push(hertz);
    }

    pub fn consumed_count(&self) -> u64 {
        self.consumed.load(Ordering::Relaxed)
    }

    pub fn malformed_count(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    pub fn persisted_count(&self) -> u64 {
        self.persisted.load(Ordering::Relaxed)
    }

    pub fn persist_failure_count(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    pub fn classifier_failure_count(&self) -> u64 {
        self.classifier_failures.load(Ordering::Relaxed)
    }

    pub fn anomaly_count(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }

    pub fn alerts_sent_count(&self) -> u64 {
        self.alerts_sent.load(Ordering::Relaxed)
    }

    pub fn alert_failure_count(&self) -> u64 {
        self.alert_failures.load(Ordering::Relaxed)
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> RunnerSnapshot {
        let frequency = StatsSummary::from(
            &*self
                .frequency_stats
                .lock()
                .expect("stats lock poisoned"),
        );
        RunnerSnapshot {
            consumed: self.consumed_count(),
            malformed: self.malformed_count(),
            persisted: self.persisted_count(),
            persist_failures: self.persist_failure_count(),
            classifier_failures: self.classifier_failure_count(),
            anomalies: self.anomaly_count(),
            alerts_sent: self.alerts_sent_count(),
            alert_failures: self.alert_failure_count(),
            frequency,
        }
    }
}

/// Snapshot of runner counters (for reporting)
#[derive(Debug, Clone, Default)]
pub struct RunnerSnapshot {
    pub consumed: u64,
    pub malformed: u64,
    pub persisted: u64,
    pub persist_failures: u64,
    pub classifier_failures: u64,
    pub anomalies: u64,
    pub alerts_sent: u64,
    pub alert_failures: u64,
    pub frequency: StatsSummary,
}
