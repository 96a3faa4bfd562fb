//! Cluster configuration loading.
//!
//! A config file is optional: without one the stock cluster described by
//! [`ClusterConfig::default`] is used. When a path is given it must exist.

use crate::config::schema::ClusterConfig;
use crate::error::{Result, SpockctrlError};
use std::fs;
use std::path::Path;

/// Load a single config file and parse it into ClusterConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ClusterConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SpockctrlError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            anyhow::Error::new(e)
                .context(format!("Failed to read config at {}", path.display()))
                .into()
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into ClusterConfig.
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ClusterConfig> {
    if content.trim().is_empty() {
        return Ok(ClusterConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SpockctrlError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// If `config_path` is provided, loads that file; otherwise returns the
/// default cluster.
pub fn load_config(config_path: Option<&Path>) -> Result<ClusterConfig> {
    match config_path {
        Some(path) => {
            tracing::debug!("Loading cluster config from {}", path.display());
            load_config_file(path)
        }
        None => Ok(ClusterConfig::default()),
    }
}
