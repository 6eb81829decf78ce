//! Configuration loading
//!
//! Precedence: command line flag, then `--config` file, then built-in default.

use anyhow::Context;
use faultline_core::InjectionConfig;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::error::Result;

/// Read a TOML configuration file
pub fn load_from_file(path: &Path) -> anyhow::Result<InjectionConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Resolve the effective configuration for this invocation
pub fn load_configuration(cli: &Cli) -> Result<InjectionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_from_file(path)?
        }
        None => {
            debug!("Using default configuration");
            InjectionConfig::default()
        }
    };

    apply_overrides(&mut config, cli);
    Ok(config)
}

/// Flags given on the command line win over file values
pub fn apply_overrides(config: &mut InjectionConfig, cli: &Cli) {
    if let Some(endpoint) = &cli.rpc {
        config.rpc.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.rpc_timeout {
        config.rpc.timeout_secs = Some(timeout);
    }
    if let Some(binary) = &cli.container_binary {
        config.container.binary = binary.clone();
    }
}
