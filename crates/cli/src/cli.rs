//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// freqwatch - network-frequency monitoring pipeline
#[derive(Parser, Debug)]
#[command(
    name = "freqwatch",
    author,
    version,
    about = "Network-frequency monitoring pipeline",
    long_about = "A message-driven monitoring pipeline for simulated power-grid \n\
                  network-frequency readings.\n\n\
                  A generator publishes synthetic readings to a partitioned topic; \n\
                  the pipeline runner consumes them, persists each normalized value, \n\
                  exports metrics, consults the anomaly classifier, and raises alerts."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FREQWATCH_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "FREQWATCH_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitoring pipeline
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "FREQWATCH_CONFIG")]
    pub config: PathBuf,

    /// Override topic name from configuration
    #[arg(long, env = "FREQWATCH_TOPIC")]
    pub topic: Option<String>,

    /// Override consumer group name from configuration
    #[arg(long, env = "FREQWATCH_GROUP")]
    pub group: Option<String>,

    /// Maximum number of messages to process (0 = unlimited)
    #[arg(long, default_value = "0", env = "FREQWATCH_MAX_MESSAGES")]
    pub max_messages: u64,

    /// Pipeline run duration in seconds (0 = until interrupted)
    #[arg(long, default_value = "0", env = "FREQWATCH_DURATION")]
    pub duration: u64,

    /// Validate configuration and exit without running pipeline
    #[arg(long)]
    pub dry_run: bool,

    /// Override metrics server port from configuration (0 = disabled)
    #[arg(long, env = "FREQWATCH_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Shutdown grace period in seconds
    #[arg(long, default_value = "5", env = "FREQWATCH_GRACE_PERIOD")]
    pub grace_period: u64,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
