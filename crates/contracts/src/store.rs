//! FrequencyStore trait - persistence interface
//!
//! The store assigns the timestamp at write time; callers hand over only the
//! normalized value. No query interface is consumed by this pipeline.

use crate::{ContractError, NormalizedReading};

/// Durable storage for normalized readings.
///
/// Implementations are shared across partition workers, so methods take
/// `&self`; interior mutability is the implementation's concern.
#[trait_variant::make(FrequencyStore: Send)]
pub trait LocalFrequencyStore: Sync {
    /// Store name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Persist one normalized reading with a store-assigned timestamp.
    ///
    /// # Errors
    /// Returns a write error (should include context)
    async fn insert(&self, reading: NormalizedReading) -> Result<(), ContractError>;

    /// Flush buffered writes (if any)
    async fn flush(&self) -> Result<(), ContractError>;

    /// Close the store
    async fn close(&self) -> Result<(), ContractError>;
}
