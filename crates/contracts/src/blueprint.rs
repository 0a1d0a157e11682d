//! PipelineBlueprint - Config Loader output
//!
//! Describes one deployment of the pipeline: channel addresses and topic,
//! generator cadence and band, storage target, classifier endpoint, alert
//! transport, metrics port. Static at startup; no hot reload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::{GroupId, MalformedPolicy, TopicName};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Channel/topic settings
    pub channel: ChannelConfig,

    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Classifier collaborator settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Alerting settings
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Metrics exporter settings
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Channel configuration: broker addresses, topic, consumer group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Broker address list (consumed by broker client implementations)
    #[serde(default = "default_brokers")]
    pub brokers: Vec<String>,

    /// Topic name
    pub topic: TopicName,

    /// Consumer group name
    pub group: GroupId,

    /// Partition count for the topic
    #[serde(default = "default_partitions")]
    pub partitions: u32,

    /// Per-partition queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// What to do with payloads that fail to parse
    #[serde(default)]
    pub malformed_policy: MalformedPolicy,
}

fn default_brokers() -> Vec<String> {
    vec!["localhost:9092".to_string()]
}

fn default_partitions() -> u32 {
    3
}

fn default_queue_capacity() -> usize {
    100
}

/// Generator configuration: cadence and value band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Interval between published readings (ms)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Lower bound of the simulated band (Hz)
    #[serde(default = "default_min_hertz")]
    pub min_hertz: f64,

    /// Upper bound of the simulated band (Hz)
    #[serde(default = "default_max_hertz")]
    pub max_hertz: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            min_hertz: default_min_hertz(),
            max_hertz: default_max_hertz(),
        }
    }
}

impl GeneratorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    250
}

fn default_min_hertz() -> f64 {
    49.0
}

fn default_max_hertz() -> f64 {
    53.0
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store kind
    #[serde(default)]
    pub kind: StorageKind,

    /// Output path (file store only)
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Write deadline (ms)
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            path: default_store_path(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

impl StorageConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/frequency.jsonl")
}

fn default_write_timeout_ms() -> u64 {
    5000
}

/// Store kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Append-only JSONL file
    #[default]
    File,
    /// Log-only (no durable writes)
    Log,
}

/// Classifier collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Classifier kind
    #[serde(default)]
    pub kind: ClassifierKind,

    /// Service URL (http kind only)
    #[serde(default = "default_classifier_url")]
    pub url: String,

    /// Request deadline (ms). None reproduces the baseline: no deadline.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Band bounds for the in-process demo classifier
    #[serde(default = "default_normal_min")]
    pub normal_min_hertz: f64,

    #[serde(default = "default_normal_max")]
    pub normal_max_hertz: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::default(),
            url: default_classifier_url(),
            timeout_ms: None,
            normal_min_hertz: default_normal_min(),
            normal_max_hertz: default_normal_max(),
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Classifier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// External HTTP service
    #[default]
    Http,
    /// In-process fixed-band check (demo runs without the service)
    Band,
}

fn default_classifier_url() -> String {
    "http://localhost:5000/predict".to_string()
}

fn default_normal_min() -> f64 {
    49.5
}

fn default_normal_max() -> f64 {
    50.5
}

/// Alerting configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Transport kind
    #[serde(default)]
    pub transport: AlertTransportKind,

    /// SMTP settings (smtp transport only)
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

/// Alert transport kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTransportKind {
    /// Log-only transport
    #[default]
    Log,
    /// SMTP mail transport
    Smtp,
}

/// SMTP transport settings
///
/// The password is read from the named environment variable, never from the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host (e.g., "smtp.gmail.com")
    pub host: String,

    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Sender address
    pub sender: String,

    /// Recipient address
    pub recipient: String,

    /// Environment variable holding the password
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_password_env() -> String {
    "FREQWATCH_SMTP_PASSWORD".to_string()
}

/// Metrics exporter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Scrape endpoint port (0 = disabled)
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

fn default_metrics_port() -> u16 {
    9091
}
