//! End-of-run statistics

use std::time::Duration;

use channel::ChannelSnapshot;
use generator::GeneratorSnapshot;
use runner::RunnerSnapshot;

/// Aggregated statistics for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Wall-clock run time
    pub duration: Duration,

    /// Partition count
    pub partitions: u32,

    /// Generator counters
    pub generator: GeneratorSnapshot,

    /// Runner counters
    pub runner: RunnerSnapshot,

    /// Channel counters
    pub channel: ChannelSnapshot,
}

impl PipelineStats {
    /// Messages processed per second
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.runner.consumed as f64 / secs
        } else {
            0.0
        }
    }

    /// Print a human-readable summary to stdout
    pub fn print_summary(&self) {
        println!("\n=== Pipeline Summary ===");
        println!(
            "Duration: {:.2}s ({} partitions)",
            self.duration.as_secs_f64(),
            self.partitions
        );
        println!(
            "Published: {} (failed: {}, rejected by queue: {})",
            self.generator.published, self.generator.failed, self.channel.rejected_count
        );
        println!(
            "Consumed: {} ({:.2} msg/s), committed offsets: {}",
            self.runner.consumed,
            self.throughput(),
            self.channel.committed_count
        );
        println!(
            "Persisted: {} (failures: {})",
            self.runner.persisted, self.runner.persist_failures
        );
        println!("Malformed payloads: {}", self.runner.malformed);
        println!(
            "Classifier failures: {}",
            self.runner.classifier_failures
        );
        println!(
            "Anomalies: {} (alerts sent: {}, alert failures: {})",
            self.runner.anomalies, self.runner.alerts_sent, self.runner.alert_failures
        );
        println!("Frequency (Hz): {}", self.runner.frequency);
        println!();
    }
}
