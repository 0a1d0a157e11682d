//! AnomalyClassifier trait - external detection service interface

use crate::{AnomalyVerdict, ContractError, NormalizedReading};

/// Anomaly detection collaborator.
///
/// The wire protocol (for HTTP implementations) carries
/// `{"frequency": <number>}` out and `{"anomaly": <boolean>}` back; any
/// other response shape is a protocol error, not a verdict.
#[trait_variant::make(AnomalyClassifier: Send)]
pub trait LocalAnomalyClassifier: Sync {
    /// Classify one normalized reading.
    ///
    /// # Errors
    /// Transport and protocol failures; never panics on a strange response.
    async fn classify(&self, reading: NormalizedReading) -> Result<AnomalyVerdict, ContractError>;
}
