//! Config parsing module
//!
//! Supports TOML (primary) and JSON (optional) formats.

use contracts::{ContractError, PipelineBlueprint};

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML config
pub fn parse_toml(content: &str) -> Result<PipelineBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON config
pub fn parse_json(content: &str) -> Result<PipelineBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse config for the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<PipelineBlueprint, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AlertTransportKind, ClassifierKind, StorageKind};

    #[test]
    fn test_parse_toml_full() {
        let content = r#"
[channel]
brokers = ["broker-a:9092", "broker-b:9092"]
topic = "network_frequency"
group = "frequency_group"
partitions = 4
malformed_policy = "ack_and_skip"

[generator]
interval_ms = 100
min_hertz = 48.5
max_hertz = 52.5

[storage]
kind = "file"
path = "/tmp/freq.jsonl"
write_timeout_ms = 2000

[classifier]
kind = "http"
url = "http://detector:5000/predict"
timeout_ms = 1500

[alerts]
transport = "smtp"

[alerts.smtp]
host = "smtp.example.com"
sender = "alerts@example.com"
recipient = "oncall@example.com"

[metrics]
port = 9300
"#;
        let bp = parse_toml(content).expect("full config must parse");
        assert_eq!(bp.channel.brokers.len(), 2);
        assert_eq!(bp.channel.partitions, 4);
        assert_eq!(bp.generator.interval_ms, 100);
        assert_eq!(bp.storage.kind, StorageKind::File);
        assert_eq!(bp.classifier.kind, ClassifierKind::Http);
        assert_eq!(bp.classifier.timeout_ms, Some(1500));
        assert_eq!(bp.alerts.transport, AlertTransportKind::Smtp);
        let smtp = bp.alerts.smtp.expect("smtp section present");
        assert_eq!(smtp.port, 587);
        assert_eq!(bp.metrics.port, 9300);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "channel": { "topic": "readings", "group": "g1" }
        }"#;
        let bp = parse_json(content).expect("minimal json must parse");
        assert_eq!(bp.channel.topic, "readings");
        assert_eq!(bp.channel.queue_capacity, 100);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
