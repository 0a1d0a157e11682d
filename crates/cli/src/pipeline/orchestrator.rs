//! Pipeline orchestrator - wires generator, channel, and runner together.
//!
//! The channel contracts keep the wiring broker-agnostic; this orchestrator
//! hosts both processes of the demo deployment over the in-process channel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use channel::MemoryChannel;
use contracts::{FrequencyStore, PipelineBlueprint};
use generator::Generator;
use runner::{drain_workers, PipelineRunner, RunnerConfig};

use super::components::{build_alerter, build_classifier, build_store};
use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The pipeline blueprint
    pub blueprint: PipelineBlueprint,

    /// Maximum number of messages to process (None = unlimited)
    pub max_messages: Option<u64>,

    /// Run duration (None = until cancelled)
    pub duration: Option<Duration>,

    /// Grace period for draining in-flight messages on shutdown
    pub grace_period: Duration,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline until a stop condition: the duration elapses, the
    /// message budget is reached, or the cancellation token fires.
    pub async fn run(self, cancel: CancellationToken) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Metrics exporter runs for the process lifetime, independent of
        // the consuming loop
        if blueprint.metrics.port != 0 {
            observability::init_metrics_only(blueprint.metrics.port)?;
            info!(port = blueprint.metrics.port, "Metrics endpoint available");
        }

        // Channel
        let channel = MemoryChannel::new(
            blueprint.channel.topic.clone(),
            blueprint.channel.partitions,
            blueprint.channel.queue_capacity,
        );
        info!(
            topic = %channel.topic(),
            partitions = channel.partitions(),
            "Channel ready"
        );

        // Collaborators
        let store = Arc::new(
            build_store(&blueprint.storage)
                .await
                .context("Failed to initialize store")?,
        );
        let anomaly_classifier = Arc::new(
            build_classifier(&blueprint.classifier).context("Failed to initialize classifier")?,
        );
        let alerter =
            Arc::new(build_alerter(&blueprint.alerts).context("Failed to initialize alerting")?);

        // Runner: one worker per assigned partition
        let runner_config = RunnerConfig {
            malformed_policy: blueprint.channel.malformed_policy,
            write_timeout: blueprint.storage.write_timeout(),
        };
        let pipeline_runner = PipelineRunner::new(
            runner_config,
            Arc::clone(&store),
            anomaly_classifier,
            alerter,
        );
        let counters = pipeline_runner.counters();

        let consumers = channel
            .join_group(&blueprint.channel.group)
            .context("Failed to join consumer group")?;
        let worker_handles = pipeline_runner.spawn_workers(consumers, &cancel);

        // Generator
        let frequency_generator = Generator::new(blueprint.generator.clone(), channel.publisher());
        let generator_metrics = frequency_generator.metrics();
        let generator_handle = frequency_generator.spawn(cancel.clone());

        info!(
            max_messages = ?self.config.max_messages,
            duration = ?self.config.duration,
            "Pipeline running"
        );

        // Stop conditions
        let budget = self.config.max_messages;
        let budget_counters = Arc::clone(&counters);
        let budget_reached = async move {
            match budget {
                Some(max) => {
                    let mut poll = tokio::time::interval(Duration::from_millis(50));
                    loop {
                        poll.tick().await;
                        if budget_counters.consumed_count() >= max {
                            break;
                        }
                    }
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = budget_reached => {
                info!(messages = counters.consumed_count(), "Message budget reached");
            }
            _ = sleep_or_pending(self.config.duration) => {
                info!("Run duration elapsed");
            }
        }

        // Shutdown: stop producing and consuming, drain in-flight work
        info!("Shutting down pipeline...");
        cancel.cancel();

        drain_workers(worker_handles, self.config.grace_period).await;
        if timeout(self.config.grace_period, generator_handle)
            .await
            .is_err()
        {
            warn!("Generator did not stop within grace period");
        }

        if let Err(e) = store.flush().await {
            warn!(error = %e, "Store flush failed on shutdown");
        }
        if let Err(e) = store.close().await {
            warn!(error = %e, "Store close failed on shutdown");
        }

        let stats = PipelineStats {
            duration: start_time.elapsed(),
            partitions: channel.partitions(),
            generator: generator_metrics.snapshot(),
            runner: counters.snapshot(),
            channel: channel.metrics().snapshot(),
        };

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            "Pipeline shutdown complete"
        );

        Ok(stats)
    }
}

async fn sleep_or_pending(duration: Option<Duration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}
