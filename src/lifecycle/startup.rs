//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: a bad config file is fatal
//! - No config file means built-in defaults
//! - Command-line overrides are validated like file values

use std::path::Path;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, GateConfig};

/// Resolve the effective configuration from an optional file and an
/// optional bind address override.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<GateConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };

    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}
