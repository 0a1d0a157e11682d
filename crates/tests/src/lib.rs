//! # Integration Tests
//!
//! End-to-end tests over the in-process channel.
//!
//! Covers:
//! - generator -> channel -> runner -> store flow
//! - the exact truncation scenario (`"49.995"` arrives, `49.99` lands)
//! - anomaly alert fan-out
//! - shutdown draining the in-flight message

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use bytes::Bytes;
    use tokio_util::sync::CancellationToken;

    use channel::MemoryChannel;
    use classifier::BandClassifier;
    use contracts::{
        AlertMessage, AlertTransport, AnomalyClassifier, AnomalyVerdict, ContractError,
        FrequencyStore, GeneratorConfig, NormalizedReading, TopicPublisher,
    };
    use generator::Generator;
    use runner::{drain_workers, PipelineRunner, RunnerConfig};
    use storage::MemoryStore;

    /// Classifier that records what it was asked about.
    struct RecordingClassifier {
        inner: BandClassifier,
        calls: Mutex<Vec<f64>>,
    }

    impl RecordingClassifier {
        fn new(normal_min: f64, normal_max: f64) -> Self {
            Self {
                inner: BandClassifier::new(normal_min, normal_max),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl AnomalyClassifier for RecordingClassifier {
        async fn classify(
            &self,
            reading: NormalizedReading,
        ) -> Result<AnomalyVerdict, ContractError> {
            self.calls.lock().unwrap().push(reading.hertz);
            self.inner.classify(reading).await
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

    /// Store that takes a while per insert, to exercise shutdown draining.
    struct SlowStore {
        inner: MemoryStore,
        delay: Duration,
    }

    impl FrequencyStore for SlowStore {
        fn name(&self) -> &str {
            "slow"
        }

        async fn insert(&self, reading: NormalizedReading) -> Result<(), ContractError> {
            tokio::time::sleep(self.delay).await;
            self.inner.insert(reading).await
        }

        async fn flush(&self) -> Result<(), ContractError> {
            self.inner.flush().await
        }

        async fn close(&self) -> Result<(), ContractError> {
            self.inner.close().await
        }
    }

    fn runner_with(
        store: Arc<MemoryStore>,
        classifier: Arc<RecordingClassifier>,
        alerter: Arc<RecordingAlerter>,
    ) -> PipelineRunner<MemoryStore, RecordingClassifier, RecordingAlerter> {
        PipelineRunner::new(RunnerConfig::default(), store, classifier, alerter)
    }

    /// Generator -> channel -> runner -> store, with real partitioning.
    #[tokio::test]
    async fn test_e2e_generator_to_store() {
        let channel = MemoryChannel::new("network_frequency".into(), 3, 128);
        let store = Arc::new(MemoryStore::new());
        let classifier = Arc::new(RecordingClassifier::new(49.5, 50.5));
        let alerter = Arc::new(RecordingAlerter::default());

        let pipeline_runner = runner_with(Arc::clone(&store), classifier, alerter);
        let counters = pipeline_runner.counters();

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let worker_handles = pipeline_runner.spawn_workers(consumers, &cancel);

        let config = GeneratorConfig {
            interval_ms: 1,
            min_hertz: 49.0,
            max_hertz: 53.0,
        };
        let generator_handle =
            Generator::new(config, channel.publisher()).spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(150)).await;
        cancel.cancel();
        drain_workers(worker_handles, Duration::from_secs(1)).await;
        generator_handle.await.unwrap();

        let consumed = counters.consumed_count();
        assert!(consumed > 0, "pipeline processed nothing");
        assert_eq!(counters.malformed_count(), 0);
        assert_eq!(counters.persisted_count(), consumed);

        // Every persisted value is normalized (two decimals, truncated) and
        // inside the generator band
        for hertz in store.frequencies() {
            assert!((49.0..=53.0).contains(&hertz));
            assert_eq!((hertz * 100.0).floor() / 100.0, hertz);
        }

        // Every consumed message had its offset committed
        let committed: u64 = (0..channel.partitions())
            .map(|p| channel.committed_offset(p))
            .sum();
        assert_eq!(committed, consumed);
    }

    /// Publish "49.995": the store sees 49.99 and the classifier is asked
    /// about 49.99.
    #[tokio::test]
    async fn test_e2e_truncation_scenario() {
        let channel = MemoryChannel::new("network_frequency".into(), 1, 8);
        let store = Arc::new(MemoryStore::new());
        let classifier = Arc::new(RecordingClassifier::new(49.5, 50.5));
        let alerter = Arc::new(RecordingAlerter::default());

        channel
            .publisher()
            .publish(Bytes::from_static(b"49.995"))
            .await
            .unwrap();

        let pipeline_runner =
            runner_with(Arc::clone(&store), Arc::clone(&classifier), alerter);
        let counters = pipeline_runner.counters();

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let worker_handles = pipeline_runner.spawn_workers(consumers, &cancel);

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        drain_workers(worker_handles, Duration::from_secs(1)).await;

        assert_eq!(store.frequencies(), vec![49.99]);
        assert_eq!(*classifier.calls.lock().unwrap(), vec![49.99]);

        // The runner observed exactly that one normalized value
        let snapshot = counters.snapshot();
        assert_eq!(snapshot.frequency.count, 1);
        assert_eq!(snapshot.frequency.min, 49.99);
        assert_eq!(snapshot.frequency.max, 49.99);
    }

    /// One out-of-band reading produces exactly one alert; in-band readings
    /// produce none.
    #[tokio::test]
    async fn test_e2e_anomaly_alert_fanout() {
        let channel = MemoryChannel::new("network_frequency".into(), 1, 8);
        let store = Arc::new(MemoryStore::new());
        let classifier = Arc::new(RecordingClassifier::new(49.5, 50.5));
        let alerter = Arc::new(RecordingAlerter::default());

        let publisher = channel.publisher();
        for payload in ["50.00", "52.10", "50.25"] {
            publisher
                .publish(Bytes::copy_from_slice(payload.as_bytes()))
                .await
                .unwrap();
        }

        let pipeline_runner =
            runner_with(Arc::clone(&store), classifier, Arc::clone(&alerter));
        let counters = pipeline_runner.counters();

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let worker_handles = pipeline_runner.spawn_workers(consumers, &cancel);

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        drain_workers(worker_handles, Duration::from_secs(1)).await;

        assert_eq!(counters.anomaly_count(), 1);
        let sent = alerter.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].body,
            "ALERT: Anomaly detected! The frequency is 52.10 Hz"
        );
        // All three readings persisted regardless of verdict
        assert_eq!(store.frequencies().len(), 3);
    }

    /// Cancellation between pickup and persistence: the in-flight message
    /// still finishes all stages and commits.
    #[tokio::test]
    async fn test_shutdown_drains_in_flight_message() {
        let channel = MemoryChannel::new("network_frequency".into(), 1, 8);
        let store = Arc::new(SlowStore {
            inner: MemoryStore::new(),
            delay: Duration::from_millis(100),
        });
        let classifier = Arc::new(RecordingClassifier::new(49.5, 50.5));
        let alerter = Arc::new(RecordingAlerter::default());

        channel
            .publisher()
            .publish(Bytes::from_static(b"50.00"))
            .await
            .unwrap();

        let pipeline_runner =
            PipelineRunner::new(RunnerConfig::default(), Arc::clone(&store), classifier, alerter);
        let counters = pipeline_runner.counters();

        let cancel = CancellationToken::new();
        let consumers = channel.join_group(&"frequency_group".into()).unwrap();
        let worker_handles = pipeline_runner.spawn_workers(consumers, &cancel);

        // Let the worker pick the message up, then cancel mid-insert
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
        drain_workers(worker_handles, Duration::from_secs(2)).await;

        assert_eq!(counters.persisted_count(), 1);
        assert_eq!(store.inner.frequencies(), vec![50.00]);
        assert_eq!(channel.committed_offset(0), 1);
    }
}
