//! MemoryStore - in-process store for tests

use std::sync::Mutex;

use contracts::{ContractError, FrequencyStore, NormalizedReading};

use crate::record::FrequencyRecord;

/// Store that keeps records in a vector.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<FrequencyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far, in insertion order.
    pub fn records(&self) -> Vec<FrequencyRecord> {
        self.records.lock().expect("store lock poisoned").clone()
    }

    /// Persisted frequency values, in insertion order.
    pub fn frequencies(&self) -> Vec<f64> {
        self.records().iter().map(|r| r.frequency).collect()
    }
}

impl FrequencyStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, reading: NormalizedReading) -> Result<(), ContractError> {
        self.records
            .lock()
            .expect("store lock poisoned")
            .push(FrequencyRecord::stamp(reading));
        Ok(())
    }

    async fn flush(&self) -> Result<(), ContractError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), ContractError> {
        Ok(())
    }
}
