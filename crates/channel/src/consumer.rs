//! MemoryPartitionConsumer - one assigned partition

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::trace;

use contracts::{ContractError, Offset, PartitionConsumer, PartitionId, TopicMessage};

use crate::metrics::ChannelMetrics;

/// Consumer side of one partition of a [`crate::MemoryChannel`].
///
/// Owns the partition's receive queue, so delivery order is the queue
/// order: strict FIFO per partition.
#[derive(Debug)]
pub struct MemoryPartitionConsumer {
    partition: PartitionId,
    rx: mpsc::Receiver<TopicMessage>,
    committed: Arc<AtomicU64>,
    metrics: Arc<ChannelMetrics>,
}

impl MemoryPartitionConsumer {
    pub(crate) fn new(
        partition: PartitionId,
        rx: mpsc::Receiver<TopicMessage>,
        committed: Arc<AtomicU64>,
        metrics: Arc<ChannelMetrics>,
    ) -> Self {
        Self {
            partition,
            rx,
            committed,
            metrics,
        }
    }
}

impl PartitionConsumer for MemoryPartitionConsumer {
    fn partition(&self) -> PartitionId {
        self.partition
    }

    async fn next(&mut self) -> Option<TopicMessage> {
        let message = self.rx.recv().await;
        if let Some(ref m) = message {
            trace!(partition = self.partition, offset = m.offset, "message delivered");
        }
        message
    }

    async fn ack(&mut self, offset: Offset) -> Result<(), ContractError> {
        self.committed.store(offset + 1, Ordering::Release);
        self.metrics.inc_committed();
        trace!(partition = self.partition, offset, "offset committed");
        Ok(())
    }
}
