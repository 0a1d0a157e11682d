//! Partition worker - runs the stage sequence for one assigned partition

use std::sync::Arc;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use contracts::{
    parse_payload, AlertMessage, AlertTransport, AnomalyClassifier, FrequencyStore, ParseOutcome,
    PartitionConsumer, TopicMessage,
};
use observability::{
    record_alert_dispatch, record_anomaly, record_classifier_failure, record_current_frequency,
    record_malformed_payload, record_message_consumed, record_store_write,
};

use crate::counters::RunnerCounters;
use crate::runner::RunnerConfig;

/// What one message's stage sequence produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// All stages ran; `anomaly` is the classifier's verdict.
    Completed { anomaly: bool },
    /// Payload failed to parse; everything after the parse stage skipped.
    Malformed,
    /// Classifier unavailable; the alert stage skipped, message still
    /// acknowledged.
    ClassifierUnavailable,
}

/// Everything a worker needs, cloned per partition.
pub(crate) struct WorkerContext<S, C, A> {
    pub config: RunnerConfig,
    pub store: Arc<S>,
    pub classifier: Arc<C>,
    pub alerter: Arc<A>,
    pub counters: Arc<RunnerCounters>,
}

impl<S, C, A> Clone for WorkerContext<S, C, A> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: Arc::clone(&self.store),
            classifier: Arc::clone(&self.classifier),
            alerter: Arc::clone(&self.alerter),
            counters: Arc::clone(&self.counters),
        }
    }
}

/// Consume one partition until cancellation or channel close.
///
/// Cancellation is honored only between messages: an in-flight message
/// always finishes its stage sequence before the worker exits.
#[instrument(name = "partition_worker", skip(consumer, ctx, cancel), fields(partition = consumer.partition()))]
pub(crate) async fn partition_worker<PC, S, C, A>(
    mut consumer: PC,
    ctx: WorkerContext<S, C, A>,
    cancel: CancellationToken,
) where
    PC: PartitionConsumer,
    S: FrequencyStore,
    C: AnomalyClassifier,
    A: AlertTransport,
{
    let partition = consumer.partition();
    debug!(partition, "partition worker started");

    loop {
        let message = tokio::select! {
            _ = cancel.cancelled() => break,
            delivered = consumer.next() => match delivered {
                Some(message) => message,
                None => break,
            },
        };

        let outcome = process_message(&ctx, &message).await;

        let commit = !matches!(outcome, StageOutcome::Malformed)
            || ctx.config.malformed_policy.commits_offset();
        if commit {
            if let Err(e) = consumer.ack(message.offset).await {
                error!(
                    partition,
                    offset = message.offset,
                    error = %e,
                    "offset commit failed"
                );
            }
        }
    }

    debug!(partition, "partition worker stopped");
}

/// Run one message through the stage sequence.
pub(crate) async fn process_message<S, C, A>(
    ctx: &WorkerContext<S, C, A>,
    message: &TopicMessage,
) -> StageOutcome
where
    S: FrequencyStore,
    C: AnomalyClassifier,
    A: AlertTransport,
{
    ctx.counters.record_consumed();
    record_message_consumed(message.partition);

    // Stage 1: parse
    let reading = match parse_payload(&message.payload) {
        ParseOutcome::Parsed(reading) => reading,
        ParseOutcome::Malformed { payload } => {
            ctx.counters.record_malformed();
            record_malformed_payload();
            warn!(
                partition = message.partition,
                offset = message.offset,
                payload = %payload,
                "invalid payload, skipping message"
            );
            return StageOutcome::Malformed;
        }
    };

    // Stage 2: normalize
    let normalized = reading.normalize();

    // Stage 3: persist. Bounded by the write deadline; failure does not
    // block the later stages.
    match timeout(ctx.config.write_timeout, ctx.store.insert(normalized)).await {
        Ok(Ok(())) => {
            ctx.counters.record_persisted();
            record_store_write(ctx.store.name(), true);
        }
        Ok(Err(e)) => {
            ctx.counters.record_persist_failure();
            record_store_write(ctx.store.name(), false);
            error!(
                store = ctx.store.name(),
                hertz = %normalized,
                error = %e,
                "store write failed, continuing"
            );
        }
        Err(_) => {
            ctx.counters.record_persist_failure();
            record_store_write(ctx.store.name(), false);
            error!(
                store = ctx.store.name(),
                hertz = %normalized,
                deadline_ms = ctx.config.write_timeout.as_millis() as u64,
                "store write deadline exceeded, continuing"
            );
        }
    }

    // Stage 4: export gauge (last-write-wins)
    record_current_frequency(normalized.hertz);
    ctx.counters.observe_frequency(normalized.hertz);

    // Stage 5: classify
    let verdict = match ctx.classifier.classify(normalized).await {
        Ok(verdict) => verdict,
        Err(e) => {
            ctx.counters.record_classifier_failure();
            record_classifier_failure();
            warn!(
                hertz = %normalized,
                error = %e,
                "classifier unavailable, skipping alert stage"
            );
            return StageOutcome::ClassifierUnavailable;
        }
    };

    // Stage 6: alert
    if verdict.is_anomaly {
        ctx.counters.record_anomaly();
        record_anomaly();
        warn!(hertz = %normalized, "anomaly detected");

        let alert = AlertMessage::anomaly(normalized);
        match ctx.alerter.send(&alert).await {
            Ok(()) => {
                ctx.counters.record_alert_sent();
                record_alert_dispatch(ctx.alerter.name(), true);
            }
            Err(e) => {
                ctx.counters.record_alert_failure();
                record_alert_dispatch(ctx.alerter.name(), false);
                error!(
                    transport = ctx.alerter.name(),
                    error = %e,
                    "alert dispatch failed"
                );
            }
        }
    }

    StageOutcome::Completed {
        anomaly: verdict.is_anomaly,
    }
}
