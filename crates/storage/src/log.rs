//! LogStore - logs readings instead of persisting them

use tracing::{debug, info, instrument};

use contracts::{ContractError, FrequencyStore, NormalizedReading};

use crate::record::FrequencyRecord;

/// Store that emits one log line per reading.
pub struct LogStore {
    name: String,
}

impl LogStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FrequencyStore for LogStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_store_insert",
        skip(self, reading),
        fields(store = %self.name)
    )]
    async fn insert(&self, reading: NormalizedReading) -> Result<(), ContractError> {
        let record = FrequencyRecord::stamp(reading);
        info!(
            store = %self.name,
            frequency = record.frequency,
            timestamp = %record.timestamp,
            "reading received"
        );
        Ok(())
    }

    #[instrument(name = "log_store_flush", skip(self))]
    async fn flush(&self) -> Result<(), ContractError> {
        // Nothing buffered
        Ok(())
    }

    #[instrument(name = "log_store_close", skip(self))]
    async fn close(&self) -> Result<(), ContractError> {
        debug!(store = %self.name, "LogStore closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Reading;

    #[tokio::test]
    async fn test_log_store_insert() {
        let store = LogStore::new("test_log");
        let result = store.insert(Reading::new(50.0).normalize()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_store_name() {
        let store = LogStore::new("my_store");
        assert_eq!(store.name(), "my_store");
    }
}
