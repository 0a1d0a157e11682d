//! Malformed-payload policy
//!
//! What to do with a message whose payload does not parse. The original
//! behavior (commit the offset, lose the message) is the default; holding
//! the offset is available for brokers that redeliver on rebalance.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Log, count, commit the offset. The message is gone for good.
    #[default]
    AckAndSkip,
    /// Log, count, leave the offset uncommitted.
    SkipWithoutAck,
}

impl MalformedPolicy {
    /// Whether the offset should be committed for a malformed message.
    pub fn commits_offset(self) -> bool {
        matches!(self, Self::AckAndSkip)
    }
}
