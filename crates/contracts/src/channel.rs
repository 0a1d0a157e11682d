//! Channel traits - the broker-facing interface
//!
//! Publish/subscribe on a named topic with partitioned, ordered delivery to
//! consumer groups. The broker itself is an external collaborator; these
//! traits are the whole surface this repository consumes.

use bytes::Bytes;

use crate::{ContractError, Offset, PartitionId, PublishReceipt, TopicMessage};

/// Producer-side interface.
#[trait_variant::make(TopicPublisher: Send)]
pub trait LocalTopicPublisher {
    /// Publish one payload to the topic.
    ///
    /// Partition selection is the broker's concern.
    ///
    /// # Errors
    /// Returns a publish error when the broker rejects or drops the message.
    async fn publish(&self, payload: Bytes) -> Result<PublishReceipt, ContractError>;
}

/// Consumer-side interface for a single assigned partition.
///
/// A consumer-group join yields one of these per assigned partition.
/// Messages arrive strictly in offset order; `ack` commits consumption up
/// to and including the given offset.
#[trait_variant::make(PartitionConsumer: Send)]
pub trait LocalPartitionConsumer {
    /// The partition this consumer is assigned to.
    fn partition(&self) -> PartitionId;

    /// Receive the next message, or `None` once the partition is closed.
    async fn next(&mut self) -> Option<TopicMessage>;

    /// Mark the message at `offset` as consumed.
    async fn ack(&mut self, offset: Offset) -> Result<(), ContractError>;
}
