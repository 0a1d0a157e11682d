//! HttpClassifier - client for the external prediction service

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use contracts::{AnomalyClassifier, AnomalyVerdict, ContractError, NormalizedReading};

/// Request body for the prediction endpoint.
#[derive(Debug, Serialize)]
struct PredictRequest {
    frequency: f64,
}

/// Response body. Anything that does not decode into this shape is a
/// protocol error, not a verdict.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    anomaly: bool,
}

/// HTTP client for the anomaly-prediction collaborator.
pub struct HttpClassifier {
    client: Client,
    url: String,
}

impl HttpClassifier {
    /// Build a classifier for the given endpoint.
    ///
    /// `timeout` bounds each request; `None` reproduces the baseline
    /// behavior of waiting on the service indefinitely.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ContractError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ContractError::classifier_transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AnomalyClassifier for HttpClassifier {
    #[instrument(name = "http_classifier_classify", skip(self), fields(url = %self.url))]
    async fn classify(&self, reading: NormalizedReading) -> Result<AnomalyVerdict, ContractError> {
        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest {
                frequency: reading.hertz,
            })
            .send()
            .await
            .map_err(|e| ContractError::classifier_transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| ContractError::classifier_transport(e.to_string()))?;

        let decoded: PredictResponse = response
            .json()
            .await
            .map_err(|e| ContractError::classifier_protocol(e.to_string()))?;

        trace!(hertz = %reading, anomaly = decoded.anomaly, "verdict received");

        Ok(AnomalyVerdict {
            reading,
            is_anomaly: decoded.anomaly,
        })
    }
}
