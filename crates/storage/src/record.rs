//! Stored document shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use contracts::NormalizedReading;

/// One persisted reading.
///
/// The timestamp is assigned by the store at write time, never by the
/// producer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub frequency: f64,
    pub timestamp: DateTime<Utc>,
}

impl FrequencyRecord {
    /// Stamp a normalized reading with the current wall clock.
    pub fn stamp(reading: NormalizedReading) -> Self {
        Self {
            frequency: reading.hertz,
            timestamp: Utc::now(),
        }
    }
}
