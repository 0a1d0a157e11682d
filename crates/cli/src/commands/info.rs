//! `info` command implementation.

use anyhow::{Context, Result};

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        println!("{}", config_loader::ConfigLoader::to_json(&blueprint)?);
        return Ok(());
    }

    println!("freqwatch configuration: {}\n", args.config.display());

    println!("Channel");
    println!("  brokers: {}", blueprint.channel.brokers.join(", "));
    println!("  topic: {}", blueprint.channel.topic);
    println!("  consumer group: {}", blueprint.channel.group);
    println!("  partitions: {}", blueprint.channel.partitions);
    println!("  queue capacity: {}", blueprint.channel.queue_capacity);
    println!(
        "  malformed payloads: {:?}",
        blueprint.channel.malformed_policy
    );

    println!("\nGenerator");
    println!("  interval: {}ms", blueprint.generator.interval_ms);
    println!(
        "  band: {:.2} - {:.2} Hz",
        blueprint.generator.min_hertz, blueprint.generator.max_hertz
    );

    println!("\nStorage");
    println!("  kind: {:?}", blueprint.storage.kind);
    println!("  path: {}", blueprint.storage.path.display());
    println!("  write deadline: {}ms", blueprint.storage.write_timeout_ms);

    println!("\nClassifier");
    println!("  kind: {:?}", blueprint.classifier.kind);
    match blueprint.classifier.kind {
        contracts::ClassifierKind::Http => {
            println!("  url: {}", blueprint.classifier.url);
            match blueprint.classifier.timeout_ms {
                Some(ms) => println!("  deadline: {ms}ms"),
                None => println!("  deadline: none"),
            }
        }
        contracts::ClassifierKind::Band => {
            println!(
                "  normal band: {:.2} - {:.2} Hz",
                blueprint.classifier.normal_min_hertz, blueprint.classifier.normal_max_hertz
            );
        }
    }

    println!("\nAlerts");
    println!("  transport: {:?}", blueprint.alerts.transport);
    if let Some(ref smtp) = blueprint.alerts.smtp {
        println!("  relay: {}:{}", smtp.host, smtp.port);
        println!("  sender: {}", smtp.sender);
        println!("  recipient: {}", smtp.recipient);
        println!("  password env: {}", smtp.password_env);
    }

    println!("\nMetrics");
    if blueprint.metrics.port == 0 {
        println!("  disabled");
    } else {
        println!("  port: {}", blueprint.metrics.port);
    }
    println!();

    Ok(())
}
