//! Pipeline metric recording
//!
//! The two instruments the pipeline is specified around keep their original
//! names: counter `anomaly_detected_total` and gauge `current_frequency`.
//! Everything else is operational and prefixed `freqwatch_`.

use metrics::{counter, gauge};

/// Record one reading accepted (or rejected) by the channel.
pub fn record_reading_published(success: bool) {
    if success {
        counter!("freqwatch_readings_published_total").increment(1);
    } else {
        counter!("freqwatch_publish_failures_total").increment(1);
    }
}

/// Record one message delivered to a partition worker.
pub fn record_message_consumed(partition: u32) {
    counter!(
        "freqwatch_messages_consumed_total",
        "partition" => partition.to_string()
    )
    .increment(1);
}

/// Record one payload that failed to parse.
pub fn record_malformed_payload() {
    counter!("freqwatch_malformed_payloads_total").increment(1);
}

/// Record one persistence attempt.
pub fn record_store_write(store: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "freqwatch_store_writes_total",
        "store" => store.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Set the gauge to the most recently processed normalized value.
///
/// Last-write-wins; no aggregation.
pub fn record_current_frequency(hertz: f64) {
    gauge!("current_frequency").set(hertz);
}

/// Record one classifier call that failed (transport or protocol).
pub fn record_classifier_failure() {
    counter!("freqwatch_classifier_failures_total").increment(1);
}

/// Record one detected anomaly.
pub fn record_anomaly() {
    counter!("anomaly_detected_total").increment(1);
}

/// Record one alert dispatch attempt.
pub fn record_alert_dispatch(transport: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "freqwatch_alerts_total",
        "transport" => transport.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Online statistics calculator (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a new value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(49.0);
        stats.push(50.0);
        stats.push(51.0);
        stats.push(52.0);
        stats.push(53.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 51.0).abs() < 1e-10);
        assert!((stats.min() - 49.0).abs() < 1e-10);
        assert!((stats.max() - 53.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_summary_display() {
        let summary = StatsSummary {
            count: 10,
            min: 49.01,
            max: 52.98,
            mean: 50.95,
            std_dev: 1.2,
        };
        let output = format!("{}", summary);
        assert!(output.contains("n=10"));
        assert!(output.contains("49.010"));
    }

    #[test]
    fn test_empty_summary_displays_na() {
        let summary = StatsSummary::default();
        assert_eq!(format!("{}", summary), "N/A");
    }
}
