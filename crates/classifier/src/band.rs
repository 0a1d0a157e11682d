//! BandClassifier - fixed-band demo classifier

use tracing::instrument;

use contracts::{AnomalyClassifier, AnomalyVerdict, ContractError, NormalizedReading};

/// Flags any reading outside `[normal_min, normal_max]` as anomalous.
///
/// Stand-in for the external service in broker-less demo runs; it is not a
/// detector, just the band the simulated grid considers healthy.
pub struct BandClassifier {
    normal_min: f64,
    normal_max: f64,
}

impl BandClassifier {
    pub fn new(normal_min: f64, normal_max: f64) -> Self {
        Self {
            normal_min,
            normal_max,
        }
    }
}

impl AnomalyClassifier for BandClassifier {
    #[instrument(name = "band_classifier_classify", skip(self))]
    async fn classify(&self, reading: NormalizedReading) -> Result<AnomalyVerdict, ContractError> {
        let is_anomaly = reading.hertz < self.normal_min || reading.hertz > self.normal_max;
        Ok(AnomalyVerdict {
            reading,
            is_anomaly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Reading;

    #[tokio::test]
    async fn test_inside_band_is_normal() {
        let classifier = BandClassifier::new(49.5, 50.5);
        let verdict = classifier
            .classify(Reading::new(50.0).normalize())
            .await
            .unwrap();
        assert!(!verdict.is_anomaly);
    }

    #[tokio::test]
    async fn test_outside_band_is_anomalous() {
        let classifier = BandClassifier::new(49.5, 50.5);
        for hertz in [49.49, 52.10, 48.0] {
            let verdict = classifier
                .classify(Reading::new(hertz).normalize())
                .await
                .unwrap();
            assert!(verdict.is_anomaly, "{hertz} must be anomalous");
        }
    }

    #[tokio::test]
    async fn test_band_edges_are_normal() {
        let classifier = BandClassifier::new(49.5, 50.5);
        for hertz in [49.5, 50.5] {
            let verdict = classifier
                .classify(Reading::new(hertz).normalize())
                .await
                .unwrap();
            assert!(!verdict.is_anomaly, "{hertz} is inside the band");
        }
    }
}
