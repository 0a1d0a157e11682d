//! LogTransport - logs alerts instead of sending them

use tracing::{instrument, warn};

use contracts::{AlertMessage, AlertTransport, ContractError};

/// Transport that emits each alert as a warning log line.
pub struct LogTransport {
    name: String,
}

impl LogTransport {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AlertTransport for LogTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_transport_send", skip(self, alert), fields(transport = %self.name))]
    async fn send(&self, alert: &AlertMessage) -> Result<(), ContractError> {
        warn!(
            transport = %self.name,
            subject = %alert.subject,
            body = %alert.body,
            "alert raised"
        );
        Ok(())
    }
}
