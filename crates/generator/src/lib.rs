//! # Generator
//!
//! Synthetic reading producer.
//!
//! Responsibilities:
//! - Draw a pseudo-random frequency uniformly from the configured band
//! - Format it as fixed-precision decimal text
//! - Publish one message per tick to the configured topic
//!
//! Publish failures are logged and counted; there is no retry beyond the
//! next scheduled tick and no backpressure handling. The loop runs until
//! its cancellation token fires.

mod counters;

pub use counters::{GeneratorMetrics, GeneratorSnapshot};

use std::sync::Arc;

use bytes::Bytes;
use observability::record_reading_published;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use contracts::{GeneratorConfig, Reading, TopicPublisher};

/// Fixed-cadence producer of simulated network-frequency readings.
pub struct Generator<P: TopicPublisher> {
    config: GeneratorConfig,
    publisher: P,
    metrics: Arc<GeneratorMetrics>,
}

impl<P: TopicPublisher + Send + Sync + 'static> Generator<P> {
    pub fn new(config: GeneratorConfig, publisher: P) -> Self {
        Self {
            config,
            publisher,
            metrics: Arc::new(GeneratorMetrics::new()),
        }
    }

    /// Shared counters
    pub fn metrics(&self) -> Arc<GeneratorMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the produce loop until cancellation.
    #[instrument(name = "generator_run", skip(self, cancel))]
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = self.config.interval_ms,
            min_hertz = self.config.min_hertz,
            max_hertz = self.config.max_hertz,
            "generator started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("generator shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.publish_one().await;
                }
            }
        }

        debug!(
            published = self.metrics.published_count(),
            failed = self.metrics.failure_count(),
            "generator stopped"
        );
    }

    /// Spawn the produce loop as a background task.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(cancel).await;
        })
    }

    async fn publish_one(&self) {
        let reading = self.draw();
        let payload = Bytes::from(reading.to_payload());

        match self.publisher.publish(payload).await {
            Ok(receipt) => {
                self.metrics.record_published();
                record_reading_published(true);
                debug!(
                    hertz = format!("{:.2}", reading.hertz),
                    partition = receipt.partition,
                    offset = receipt.offset,
                    "reading published"
                );
            }
            Err(e) => {
                self.metrics.record_failure();
                record_reading_published(false);
                warn!(error = %e, "publish failed, continuing at next tick");
            }
        }
    }

    fn draw(&self) -> Reading {
        let hertz = rand::rng().random_range(self.config.min_hertz..=self.config.max_hertz);
        Reading::new(hertz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use contracts::{ContractError, ParseOutcome, PublishReceipt};

    /// Publisher that records payloads
    #[derive(Clone, Default)]
    struct RecordingPublisher {
        payloads: Arc<Mutex<Vec<Bytes>>>,
        fail: bool,
    }

    impl TopicPublisher for RecordingPublisher {
        async fn publish(&self, payload: Bytes) -> Result<PublishReceipt, ContractError> {
            if self.fail {
                return Err(ContractError::publish("readings", "broker down"));
            }
            let mut payloads = self.payloads.lock().unwrap();
            let offset = payloads.len() as u64;
            payloads.push(payload);
            Ok(PublishReceipt {
                partition: 0,
                offset,
            })
        }
    }

    fn fast_config() -> GeneratorConfig {
        GeneratorConfig {
            interval_ms: 1,
            min_hertz: 49.0,
            max_hertz: 53.0,
        }
    }

    #[tokio::test]
    async fn test_emits_parseable_readings_in_band() {
        let publisher = RecordingPublisher::default();
        let generator = Generator::new(fast_config(), publisher.clone());
        let cancel = CancellationToken::new();

        let handle = generator.spawn(cancel.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        handle.await.unwrap();

        let payloads = publisher.payloads.lock().unwrap();
        assert!(!payloads.is_empty(), "expected at least one reading");

        for payload in payloads.iter() {
            let text = std::str::from_utf8(payload).unwrap();
            // Two-decimal fixed form
            let (_, decimals) = text.split_once('.').expect("decimal point");
            assert_eq!(decimals.len(), 2, "payload {text:?}");

            match contracts::parse_payload(payload) {
                ParseOutcome::Parsed(reading) => {
                    assert!(
                        (49.0..=53.0).contains(&reading.hertz),
                        "reading {} outside band",
                        reading.hertz
                    );
                }
                ParseOutcome::Malformed { .. } => panic!("generator emitted {text:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_stop_loop() {
        let publisher = RecordingPublisher {
            payloads: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        };
        let generator = Generator::new(fast_config(), publisher.clone());
        let generator_metrics = generator.metrics();
        let cancel = CancellationToken::new();

        let handle = generator.spawn(cancel.clone());
        tokio::time::sleep(Duration::from_millis(30)).await;
        cancel.cancel();
        handle.await.unwrap();

        // Multiple failures means the loop kept ticking after the first one
        assert!(generator_metrics.failure_count() > 1);
        assert_eq!(generator_metrics.published_count(), 0);
    }
}
