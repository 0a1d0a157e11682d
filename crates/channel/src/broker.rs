//! MemoryChannel - partitioned in-process topic

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use contracts::{
    ContractError, GroupId, PartitionId, PublishReceipt, TopicMessage, TopicName, TopicPublisher,
};

use crate::consumer::MemoryPartitionConsumer;
use crate::metrics::ChannelMetrics;

/// Per-partition producer-side state
struct PartitionLane {
    tx: mpsc::Sender<TopicMessage>,
    next_offset: AtomicU64,
}

/// Producer-side topic state
struct Shared {
    topic: TopicName,
    lanes: Vec<PartitionLane>,
    cursor: AtomicUsize,
    metrics: Arc<ChannelMetrics>,
}

/// In-process partitioned topic.
///
/// Construct once, hand a [`MemoryPublisher`] to the producer and the
/// consumer set to the runner. Partition queues are bounded; a full queue
/// rejects the publish (the producer has no backpressure handling, so the
/// rejection surfaces as a publish failure, exactly like a broker refusing
/// a message).
pub struct MemoryChannel {
    shared: Arc<Shared>,
    /// Committed offset per partition (consumer-group progress)
    committed: Vec<Arc<AtomicU64>>,
    /// Receivers handed out once on group join
    receivers: Mutex<Option<Vec<mpsc::Receiver<TopicMessage>>>>,
}

impl MemoryChannel {
    /// Create a topic with `partitions` lanes of `queue_capacity` each.
    pub fn new(topic: TopicName, partitions: u32, queue_capacity: usize) -> Self {
        let mut lanes = Vec::with_capacity(partitions as usize);
        let mut receivers = Vec::with_capacity(partitions as usize);
        let mut committed = Vec::with_capacity(partitions as usize);

        for _ in 0..partitions {
            let (tx, rx) = mpsc::channel(queue_capacity);
            lanes.push(PartitionLane {
                tx,
                next_offset: AtomicU64::new(0),
            });
            receivers.push(rx);
            committed.push(Arc::new(AtomicU64::new(0)));
        }

        debug!(topic = %topic, partitions, queue_capacity, "memory channel created");

        Self {
            shared: Arc::new(Shared {
                topic,
                lanes,
                cursor: AtomicUsize::new(0),
                metrics: Arc::new(ChannelMetrics::new()),
            }),
            committed,
            receivers: Mutex::new(Some(receivers)),
        }
    }

    /// Topic name
    pub fn topic(&self) -> &TopicName {
        &self.shared.topic
    }

    /// Partition count
    pub fn partitions(&self) -> u32 {
        self.shared.lanes.len() as u32
    }

    /// Producer-side handle. Cheap to clone.
    pub fn publisher(&self) -> MemoryPublisher {
        MemoryPublisher {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Join a consumer group: every partition is assigned to this member.
    ///
    /// Only one member can hold the assignment; a second join fails the way
    /// a broker would refuse a duplicate static membership.
    #[instrument(name = "channel_join_group", skip(self), fields(topic = %self.shared.topic, group = %group))]
    pub fn join_group(
        &self,
        group: &GroupId,
    ) -> Result<Vec<MemoryPartitionConsumer>, ContractError> {
        let mut slot = self.receivers.lock().expect("receiver lock poisoned");
        let receivers = slot.take().ok_or_else(|| ContractError::GroupJoin {
            group: group.to_string(),
            topic: self.shared.topic.to_string(),
            message: "partitions already assigned".to_string(),
        })?;

        debug!(partitions = receivers.len(), "group joined");

        Ok(receivers
            .into_iter()
            .enumerate()
            .map(|(partition, rx)| {
                MemoryPartitionConsumer::new(
                    partition as PartitionId,
                    rx,
                    Arc::clone(&self.committed[partition]),
                    Arc::clone(&self.shared.metrics),
                )
            })
            .collect())
    }

    /// Next uncommitted offset for a partition.
    pub fn committed_offset(&self, partition: PartitionId) -> u64 {
        self.committed[partition as usize].load(Ordering::Acquire)
    }

    /// Channel counters
    pub fn metrics(&self) -> &ChannelMetrics {
        &self.shared.metrics
    }
}

/// Producer-side handle to a [`MemoryChannel`].
#[derive(Clone)]
pub struct MemoryPublisher {
    shared: Arc<Shared>,
}

impl TopicPublisher for MemoryPublisher {
    async fn publish(&self, payload: Bytes) -> Result<PublishReceipt, ContractError> {
        let lane_count = self.shared.lanes.len();
        let partition = self.shared.cursor.fetch_add(1, Ordering::Relaxed) % lane_count;
        let lane = &self.shared.lanes[partition];
        let offset = lane.next_offset.fetch_add(1, Ordering::Relaxed);

        let message = TopicMessage {
            topic: self.shared.topic.clone(),
            partition: partition as PartitionId,
            offset,
            payload,
        };

        match lane.tx.try_send(message) {
            Ok(()) => {
                self.shared.metrics.inc_published();
                Ok(PublishReceipt {
                    partition: partition as PartitionId,
                    offset,
                })
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.shared.metrics.inc_rejected();
                warn!(topic = %self.shared.topic, partition, "partition queue full, message rejected");
                Err(ContractError::publish(
                    self.shared.topic.as_str(),
                    format!("partition {partition} queue full"),
                ))
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(ContractError::publish(
                self.shared.topic.as_str(),
                format!("partition {partition} closed"),
            )),
        }
    }
}
