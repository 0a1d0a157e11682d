//! PipelineRunner - owns the collaborators, spawns partition workers

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use contracts::{
    AlertTransport, AnomalyClassifier, FrequencyStore, MalformedPolicy, PartitionConsumer,
};

use crate::counters::RunnerCounters;
use crate::worker::{partition_worker, WorkerContext};

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// What to do with payloads that fail to parse
    pub malformed_policy: MalformedPolicy,

    /// Deadline for each store write
    pub write_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            malformed_policy: MalformedPolicy::default(),
            write_timeout: Duration::from_secs(5),
        }
    }
}

/// The pipeline runner.
///
/// Holds the injected collaborators and spawns one worker task per
/// assigned partition. Lifecycle is owned by the caller: cancel the token,
/// then [`drain_workers`] the worker handles.
pub struct PipelineRunner<S, C, A> {
    config: RunnerConfig,
    store: Arc<S>,
    classifier: Arc<C>,
    alerter: Arc<A>,
    counters: Arc<RunnerCounters>,
}

impl<S, C, A> PipelineRunner<S, C, A>
where
    S: FrequencyStore + Send + Sync + 'static,
    C: AnomalyClassifier + Send + Sync + 'static,
    A: AlertTransport + Send + Sync + 'static,
{
    /// Construct a runner from its collaborators.
    pub fn new(config: RunnerConfig, store: Arc<S>, classifier: Arc<C>, alerter: Arc<A>) -> Self {
        Self {
            config,
            store,
            classifier,
            alerter,
            counters: Arc::new(RunnerCounters::new()),
        }
    }

    /// Shared counters
    pub fn counters(&self) -> Arc<RunnerCounters> {
        Arc::clone(&self.counters)
    }

    /// Spawn one worker per assigned partition.
    #[instrument(name = "runner_spawn_workers", skip(self, consumers, cancel), fields(partitions = consumers.len()))]
    pub fn spawn_workers<PC>(
        &self,
        consumers: Vec<PC>,
        cancel: &CancellationToken,
    ) -> Vec<JoinHandle<()>>
    where
        PC: PartitionConsumer + Send + 'static,
    {
        info!(partitions = consumers.len(), "starting partition workers");

        consumers
            .into_iter()
            .map(|consumer| {
                let ctx = self.worker_context();
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    partition_worker(consumer, ctx, cancel).await;
                })
            })
            .collect()
    }

    fn worker_context(&self) -> WorkerContext<S, C, A> {
        WorkerContext {
            config: self.config.clone(),
            store: Arc::clone(&self.store),
            classifier: Arc::clone(&self.classifier),
            alerter: Arc::clone(&self.alerter),
            counters: Arc::clone(&self.counters),
        }
    }
}

/// Await worker handles under a bounded grace period.
///
/// A worker that has not finished its in-flight message when the grace
/// period expires is aborted.
pub async fn drain_workers(handles: Vec<JoinHandle<()>>, grace: Duration) {
    for mut handle in handles {
        match timeout(grace, &mut handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = ?e, "worker task panicked"),
            Err(_) => {
                error!("worker did not drain within grace period, aborting");
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use bytes::Bytes;
    use channel::MemoryChannel;
    use contracts::{AlertMessage, AnomalyVerdict, ContractError, NormalizedReading, TopicPublisher};
    use storage::MemoryStore;

    struct ThresholdClassifier {
        limit: f64,
    }

    impl AnomalyClassifier for ThresholdClassifier {
        async fn classify(
            &self,
            reading: NormalizedReading,
        ) -> Result<AnomalyVerdict, ContractError> {
            Ok(AnomalyVerdict {
                reading,
                is_anomaly: reading.hertz > self.limit,
            })
        }
    }

    #[derive(Default)]
    struct RecordingAlerter {
        sent: Mutex<Vec<AlertMessage>>,
    }

    impl AlertTransport for RecordingAlerter {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, alert: &AlertMessage) -> Result<(), ContractError> {
            self.sent.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    async fn publish_all(channel: &MemoryChannel, payloads: &[&str]) {
        let publisher = channel.publisher();
        for payload in payloads {
            publisher
                .publish(Bytes::copy_from_slice(payload.as_bytes()))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_workers_process_all_partitions_and_commit() {
        let channel = MemoryChannel::new("readings".into(), 2, 16);
        publish_all(&channel, &["49.995", "52.80", "50.10", "junk"]).await;

        let store = Arc::new(MemoryStore::new());
        let runner = PipelineRunner::new(
            RunnerConfig::default(),
            Arc::clone(&store),
            Arc::new(ThresholdClassifier { limit: 52.0 }),
            Arc::new(RecordingAlerter::default()),
        );
        let counters = runner.counters();

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let handles = runner.spawn_workers(consumers, &cancel);

        // Four messages across two partitions; give the workers a moment
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        drain_workers(handles, Duration::from_secs(1)).await;

        assert_eq!(counters.consumed_count(), 4);
        assert_eq!(counters.malformed_count(), 1);
        assert_eq!(counters.anomaly_count(), 1);

        // Three parseable readings persisted, truncated
        let mut frequencies = store.frequencies();
        frequencies.sort_by(f64::total_cmp);
        assert_eq!(frequencies, vec![49.99, 50.10, 52.80]);

        // Round-robin put two messages on each partition; every offset
        // (including the malformed message under AckAndSkip) is committed
        assert_eq!(channel.committed_offset(0), 2);
        assert_eq!(channel.committed_offset(1), 2);
    }

    #[tokio::test]
    async fn test_skip_without_ack_leaves_offset_uncommitted() {
        let channel = MemoryChannel::new("readings".into(), 1, 16);
        publish_all(&channel, &["not-a-number"]).await;

        let config = RunnerConfig {
            malformed_policy: MalformedPolicy::SkipWithoutAck,
            ..Default::default()
        };
        let runner = PipelineRunner::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(ThresholdClassifier { limit: 52.0 }),
            Arc::new(RecordingAlerter::default()),
        );

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let handles = runner.spawn_workers(consumers, &cancel);

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        drain_workers(handles, Duration::from_secs(1)).await;

        assert_eq!(channel.committed_offset(0), 0);
    }

    #[tokio::test]
    async fn test_per_partition_order_preserved_in_store() {
        let channel = MemoryChannel::new("readings".into(), 1, 32);
        publish_all(&channel, &["49.10", "49.20", "49.30", "49.40"]).await;

        let store = Arc::new(MemoryStore::new());
        let runner = PipelineRunner::new(
            RunnerConfig::default(),
            Arc::clone(&store),
            Arc::new(ThresholdClassifier { limit: 52.0 }),
            Arc::new(RecordingAlerter::default()),
        );

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let handles = runner.spawn_workers(consumers, &cancel);

        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        drain_workers(handles, Duration::from_secs(1)).await;

        // Single partition: store order is publish order
        assert_eq!(store.frequencies(), vec![49.10, 49.20, 49.30, 49.40]);
    }
}
