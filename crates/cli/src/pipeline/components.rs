//! Collaborator construction from the blueprint
//!
//! The runner is generic over its collaborators; these enums give the CLI a
//! single concrete type per slot while the blueprint picks the variant at
//! startup.

use alerting::{LogTransport, SmtpAlerter};
use classifier::{BandClassifier, HttpClassifier};
use storage::{FileStore, LogStore};
use tracing::info;

use contracts::{
    AlertConfig, AlertMessage, AlertTransport, AlertTransportKind, AnomalyClassifier,
    AnomalyVerdict, ClassifierConfig, ClassifierKind, ContractError, FrequencyStore,
    NormalizedReading, StorageConfig, StorageKind,
};

/// Store selected by the blueprint
pub enum AnyStore {
    File(FileStore),
    Log(LogStore),
}

impl FrequencyStore for AnyStore {
    fn name(&self) -> &str {
        match self {
            Self::File(store) => store.name(),
            Self::Log(store) => store.name(),
        }
    }

    async fn insert(&self, reading: NormalizedReading) -> Result<(), ContractError> {
        match self {
            Self::File(store) => store.insert(reading).await,
            Self::Log(store) => store.insert(reading).await,
        }
    }

    async fn flush(&self) -> Result<(), ContractError> {
        match self {
            Self::File(store) => store.flush().await,
            Self::Log(store) => store.flush().await,
        }
    }

    async fn close(&self) -> Result<(), ContractError> {
        match self {
            Self::File(store) => store.close().await,
            Self::Log(store) => store.close().await,
        }
    }
}

/// Classifier selected by the blueprint
pub enum AnyClassifier {
    Http(HttpClassifier),
    Band(BandClassifier),
}

impl AnomalyClassifier for AnyClassifier {
    async fn classify(&self, reading: NormalizedReading) -> Result<AnomalyVerdict, ContractError> {
        match self {
            Self::Http(classifier) => classifier.classify(reading).await,
            Self::Band(classifier) => classifier.classify(reading).await,
        }
    }
}

/// Alert transport selected by the blueprint
pub enum AnyAlerter {
    Smtp(SmtpAlerter),
    Log(LogTransport),
}

impl AlertTransport for AnyAlerter {
    fn name(&self) -> &str {
        match self {
            Self::Smtp(alerter) => alerter.name(),
            Self::Log(alerter) => alerter.name(),
        }
    }

    async fn send(&self, alert: &AlertMessage) -> Result<(), ContractError> {
        match self {
            Self::Smtp(alerter) => alerter.send(alert).await,
            Self::Log(alerter) => alerter.send(alert).await,
        }
    }
}

/// Build the store the blueprint asks for.
pub async fn build_store(config: &StorageConfig) -> Result<AnyStore, ContractError> {
    match config.kind {
        StorageKind::File => {
            let store = FileStore::open("frequency_file", &config.path).await?;
            info!(path = %store.path().display(), "file store ready");
            Ok(AnyStore::File(store))
        }
        StorageKind::Log => Ok(AnyStore::Log(LogStore::new("frequency_log"))),
    }
}

/// Build the classifier the blueprint asks for.
pub fn build_classifier(config: &ClassifierConfig) -> Result<AnyClassifier, ContractError> {
    match config.kind {
        ClassifierKind::Http => {
            let classifier = HttpClassifier::new(config.url.clone(), config.timeout())?;
            info!(url = %config.url, "http classifier ready");
            Ok(AnyClassifier::Http(classifier))
        }
        ClassifierKind::Band => {
            info!(
                normal_min = config.normal_min_hertz,
                normal_max = config.normal_max_hertz,
                "band classifier ready"
            );
            Ok(AnyClassifier::Band(BandClassifier::new(
                config.normal_min_hertz,
                config.normal_max_hertz,
            )))
        }
    }
}

/// Build the alert transport the blueprint asks for.
pub fn build_alerter(config: &AlertConfig) -> Result<AnyAlerter, ContractError> {
    match config.transport {
        AlertTransportKind::Smtp => {
            let smtp = config.smtp.as_ref().ok_or_else(|| {
                ContractError::config_validation("alerts.smtp", "smtp section missing")
            })?;
            let alerter = SmtpAlerter::from_config(smtp)?;
            info!(relay = %smtp.host, "smtp alert transport ready");
            Ok(AnyAlerter::Smtp(alerter))
        }
        AlertTransportKind::Log => Ok(AnyAlerter::Log(LogTransport::new("alert_log"))),
    }
}
