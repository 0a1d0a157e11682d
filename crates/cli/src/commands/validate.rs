//! `validate` command implementation.

use anyhow::Result;
use tracing::info;

use crate::cli::ValidateArgs;

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            if args.json {
                let result = serde_json::json!({
                    "valid": true,
                    "config": args.config.display().to_string(),
                    "topic": blueprint.channel.topic.as_str(),
                    "partitions": blueprint.channel.partitions,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Configuration is valid: {}", args.config.display());
                println!(
                    "  topic={} group={} partitions={}",
                    blueprint.channel.topic, blueprint.channel.group, blueprint.channel.partitions
                );
            }
            info!(config = %args.config.display(), "Validation passed");
            Ok(())
        }
        Err(e) => {
            if args.json {
                let result = serde_json::json!({
                    "valid": false,
                    "config": args.config.display().to_string(),
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                eprintln!("Configuration is invalid: {e}");
            }
            Err(e.into())
        }
    }
}
