//! TopicMessage - the unit of delivery on the channel
//!
//! Payloads are UTF-8 decimal text with no schema versioning; partition and
//! offset come from the broker and drive ordering and acknowledgement.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::TopicName;

/// Zero-based partition index within a topic.
pub type PartitionId = u32;

/// Monotonic per-partition message position.
pub type Offset = u64;

/// One delivered message.
#[derive(Debug, Clone)]
pub struct TopicMessage {
    /// Topic the message was published to
    pub topic: TopicName,

    /// Partition that delivered the message
    pub partition: PartitionId,

    /// Position within the partition
    pub offset: Offset,

    /// Raw payload (zero-copy)
    pub payload: Bytes,
}

impl TopicMessage {
    /// Payload as text, if it is valid UTF-8.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// Broker confirmation for one published message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub partition: PartitionId,
    pub offset: Offset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_str() {
        let message = TopicMessage {
            topic: "readings".into(),
            partition: 0,
            offset: 7,
            payload: Bytes::from_static(b"50.01"),
        };
        assert_eq!(message.payload_str(), Some("50.01"));
    }

    #[test]
    fn test_payload_str_rejects_invalid_utf8() {
        let message = TopicMessage {
            topic: "readings".into(),
            partition: 0,
            offset: 0,
            payload: Bytes::from_static(&[0xff, 0xfe]),
        };
        assert_eq!(message.payload_str(), None);
    }
}
