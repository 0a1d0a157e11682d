//! AlertTransport trait - notification interface

use crate::{ContractError, NormalizedReading};

/// A rendered notification ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    /// Render the fixed anomaly template for one flagged reading.
    pub fn anomaly(reading: NormalizedReading) -> Self {
        Self {
            subject: "Anomaly Detected in Network Frequency".to_string(),
            body: format!("ALERT: Anomaly detected! The frequency is {reading} Hz"),
        }
    }
}

/// Notification collaborator (mail, webhook, log).
///
/// Sender, recipient, and credentials are static configuration owned by the
/// implementation.
#[trait_variant::make(AlertTransport: Send)]
pub trait LocalAlertTransport: Sync {
    /// Transport name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one alert. Synchronous from the pipeline's point of view.
    ///
    /// # Errors
    /// Delivery failure; callers log and continue, never retry.
    async fn send(&self, alert: &AlertMessage) -> Result<(), ContractError>;
}
