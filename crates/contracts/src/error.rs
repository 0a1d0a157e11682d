//! Layered error definitions
//!
//! Categorized by source: config / channel / payload / store / classifier / alert

use thiserror::Error;

use crate::PartitionId;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Channel Errors =====
    /// Publish failed
    #[error("publish to topic '{topic}' failed: {message}")]
    ChannelPublish { topic: String, message: String },

    /// Consume/subscribe failed
    #[error("consume error on partition {partition}: {message}")]
    ChannelConsume {
        partition: PartitionId,
        message: String,
    },

    /// Consumer group join failed
    #[error("group '{group}' could not join topic '{topic}': {message}")]
    GroupJoin {
        group: String,
        topic: String,
        message: String,
    },

    // ===== Payload Errors =====
    /// Message payload could not be interpreted
    #[error("malformed payload: {payload:?}")]
    MalformedPayload { payload: String },

    // ===== Store Errors =====
    /// Store write error
    #[error("store '{store_name}' write error: {message}")]
    StoreWrite { store_name: String, message: String },

    // ===== Classifier Errors =====
    /// Classifier transport error
    #[error("classifier transport error: {message}")]
    ClassifierTransport { message: String },

    /// Classifier returned a response outside the protocol
    #[error("classifier protocol error: {message}")]
    ClassifierProtocol { message: String },

    // ===== Alert Errors =====
    /// Alert send error
    #[error("alert transport '{transport}' send error: {message}")]
    AlertSend { transport: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create publish error
    pub fn publish(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ChannelPublish {
            topic: topic.into(),
            message: message.into(),
        }
    }

    /// Create consume error
    pub fn consume(partition: PartitionId, message: impl Into<String>) -> Self {
        Self::ChannelConsume {
            partition,
            message: message.into(),
        }
    }

    /// Create store write error
    pub fn store_write(store_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreWrite {
            store_name: store_name.into(),
            message: message.into(),
        }
    }

    /// Create classifier transport error
    pub fn classifier_transport(message: impl Into<String>) -> Self {
        Self::ClassifierTransport {
            message: message.into(),
        }
    }

    /// Create classifier protocol error
    pub fn classifier_protocol(message: impl Into<String>) -> Self {
        Self::ClassifierProtocol {
            message: message.into(),
        }
    }

    /// Create alert send error
    pub fn alert_send(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AlertSend {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from a collaborator rather than this process.
    ///
    /// Collaborator errors degrade the pipeline but never stop it.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::ChannelPublish { .. }
                | Self::ChannelConsume { .. }
                | Self::StoreWrite { .. }
                | Self::ClassifierTransport { .. }
                | Self::ClassifierProtocol { .. }
                | Self::AlertSend { .. }
        )
    }
}
