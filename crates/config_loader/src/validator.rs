//! Config validation module
//!
//! Validation rules:
//! - topic / group / brokers non-empty
//! - partitions >= 1, queue_capacity >= 1
//! - generator interval > 0, min_hertz < max_hertz
//! - storage write deadline > 0; file store path non-empty
//! - http classifier has a URL; band classifier has a valid band
//! - smtp transport has a complete smtp section

use contracts::{
    AlertTransportKind, ClassifierKind, ContractError, PipelineBlueprint, StorageKind,
};

/// Validate a PipelineBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    validate_channel(blueprint)?;
    validate_generator(blueprint)?;
    validate_storage(blueprint)?;
    validate_classifier(blueprint)?;
    validate_alerts(blueprint)?;
    Ok(())
}

fn validate_channel(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let channel = &blueprint.channel;
    if channel.topic.is_empty() {
        return Err(ContractError::config_validation(
            "channel.topic",
            "must not be empty",
        ));
    }
    if channel.group.is_empty() {
        return Err(ContractError::config_validation(
            "channel.group",
            "must not be empty",
        ));
    }
    if channel.brokers.is_empty() || channel.brokers.iter().any(|b| b.is_empty()) {
        return Err(ContractError::config_validation(
            "channel.brokers",
            "at least one non-empty broker address required",
        ));
    }
    if channel.partitions == 0 {
        return Err(ContractError::config_validation(
            "channel.partitions",
            "must be >= 1",
        ));
    }
    if channel.queue_capacity == 0 {
        return Err(ContractError::config_validation(
            "channel.queue_capacity",
            "must be >= 1",
        ));
    }
    Ok(())
}

fn validate_generator(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let generator = &blueprint.generator;
    if generator.interval_ms == 0 {
        return Err(ContractError::config_validation(
            "generator.interval_ms",
            "must be > 0",
        ));
    }
    if !generator.min_hertz.is_finite() || !generator.max_hertz.is_finite() {
        return Err(ContractError::config_validation(
            "generator.min_hertz/max_hertz",
            "band bounds must be finite",
        ));
    }
    if generator.min_hertz >= generator.max_hertz {
        return Err(ContractError::config_validation(
            "generator.min_hertz",
            format!(
                "must be < max_hertz ({} >= {})",
                generator.min_hertz, generator.max_hertz
            ),
        ));
    }
    Ok(())
}

fn validate_storage(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let storage = &blueprint.storage;
    if storage.write_timeout_ms == 0 {
        return Err(ContractError::config_validation(
            "storage.write_timeout_ms",
            "must be > 0",
        ));
    }
    if storage.kind == StorageKind::File && storage.path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "storage.path",
            "file store requires a path",
        ));
    }
    Ok(())
}

fn validate_classifier(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let classifier = &blueprint.classifier;
    match classifier.kind {
        ClassifierKind::Http => {
            if classifier.url.is_empty() {
                return Err(ContractError::config_validation(
                    "classifier.url",
                    "http classifier requires a URL",
                ));
            }
        }
        ClassifierKind::Band => {
            if classifier.normal_min_hertz >= classifier.normal_max_hertz {
                return Err(ContractError::config_validation(
                    "classifier.normal_min_hertz",
                    "must be < normal_max_hertz",
                ));
            }
        }
    }
    if let Some(timeout_ms) = classifier.timeout_ms {
        if timeout_ms == 0 {
            return Err(ContractError::config_validation(
                "classifier.timeout_ms",
                "must be > 0 when set",
            ));
        }
    }
    Ok(())
}

fn validate_alerts(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    if blueprint.alerts.transport != AlertTransportKind::Smtp {
        return Ok(());
    }
    let Some(smtp) = &blueprint.alerts.smtp else {
        return Err(ContractError::config_validation(
            "alerts.smtp",
            "smtp transport requires an [alerts.smtp] section",
        ));
    };
    for (field, value) in [
        ("alerts.smtp.host", &smtp.host),
        ("alerts.smtp.sender", &smtp.sender),
        ("alerts.smtp.recipient", &smtp.recipient),
        ("alerts.smtp.password_env", &smtp.password_env),
    ] {
        if value.is_empty() {
            return Err(ContractError::config_validation(field, "must not be empty"));
        }
    }
    Ok(())
}
