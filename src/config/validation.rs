//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks value ranges and
//! addresses. Every problem is reported, not just the first one.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GateConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid address for {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("webhook_url must start with http:// or https://, got {0}")]
    WebhookScheme(String),

    #[error("unknown log level: {0}")]
    LogLevel(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.rate_limit.max_attempts == 0 {
        errors.push(ValidationError::Zero("rate_limit.max_attempts"));
    }
    if config.rate_limit.window_ms == 0 {
        errors.push(ValidationError::Zero("rate_limit.window_ms"));
    }
    if config.rate_limit.sweep_interval_secs == 0 {
        errors.push(ValidationError::Zero("rate_limit.sweep_interval_secs"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if let Some(url) = &config.notifications.webhook_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ValidationError::WebhookScheme(url.clone()));
        }
    }
    if config.notifications.webhook_timeout_secs == 0 {
        errors.push(ValidationError::Zero("notifications.webhook_timeout_secs"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
