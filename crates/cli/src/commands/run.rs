//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref topic) = args.topic {
        info!(topic = %topic, "Overriding topic from CLI");
        blueprint.channel.topic = topic.clone().into();
    }
    if let Some(ref group) = args.group {
        info!(group = %group, "Overriding consumer group from CLI");
        blueprint.channel.group = group.clone().into();
    }
    if let Some(port) = args.metrics_port {
        info!(port = port, "Overriding metrics port from CLI");
        blueprint.metrics.port = port;
    }

    info!(
        topic = %blueprint.channel.topic,
        group = %blueprint.channel.group,
        partitions = blueprint.channel.partitions,
        storage = ?blueprint.storage.kind,
        classifier = ?blueprint.classifier.kind,
        alerts = ?blueprint.alerts.transport,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        max_messages: if args.max_messages == 0 {
            None
        } else {
            Some(args.max_messages)
        },
        duration: if args.duration == 0 {
            None
        } else {
            Some(Duration::from_secs(args.duration))
        },
        grace_period: Duration::from_secs(args.grace_period),
    };

    // Create the pipeline and its cancellation token
    let pipeline = Pipeline::new(pipeline_config);
    let cancel = CancellationToken::new();

    // Interrupt signals cancel the token; workers drain in-flight messages
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Received shutdown signal, stopping pipeline...");
        signal_cancel.cancel();
    });

    info!("Starting pipeline...");

    let stats = pipeline
        .run(cancel)
        .await
        .context("Pipeline execution failed")?;

    info!(
        messages_consumed = stats.runner.consumed,
        anomalies = stats.runner.anomalies,
        duration_secs = stats.duration.as_secs_f64(),
        throughput = format!("{:.2}", stats.throughput()),
        "Pipeline completed"
    );

    // Print detailed statistics
    stats.print_summary();

    info!("freqwatch finished");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::PipelineBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Channel:");
    println!("  Brokers: {}", blueprint.channel.brokers.join(", "));
    println!("  Topic: {}", blueprint.channel.topic);
    println!("  Group: {}", blueprint.channel.group);
    println!("  Partitions: {}", blueprint.channel.partitions);
    println!("\nGenerator:");
    println!("  Interval: {}ms", blueprint.generator.interval_ms);
    println!(
        "  Band: {:.2} - {:.2} Hz",
        blueprint.generator.min_hertz, blueprint.generator.max_hertz
    );
    println!("\nStorage: {:?}", blueprint.storage.kind);
    println!("Classifier: {:?}", blueprint.classifier.kind);
    println!("Alerts: {:?}", blueprint.alerts.transport);
    println!("Metrics port: {}", blueprint.metrics.port);
    println!();
}
