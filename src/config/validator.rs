//! Configuration validation rules.
//!
//! This module validates cluster configuration for correctness:
//! - The peer, source and joining roles name distinct, configured nodes
//! - Every node has a host, database, user and a non-zero port
//! - Node names, and the source node's database name, only use lowercase
//!   letters, digits and underscores, since both end up in the
//!   replication slot name
//! - At least one replication set is configured

use crate::config::schema::ClusterConfig;
use crate::error::{Result, SpockctrlError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Node name if error is node-specific
    pub node: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, so every problem in a file is reported at once.
pub fn validate_config(config: &ClusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_roles(config));
    errors.extend(validate_nodes(config));
    errors.extend(validate_slot_names(config));

    if config.replication_sets.is_empty() {
        errors.push(ValidationError {
            rule: "no-replication-sets".to_string(),
            message: "At least one replication set must be configured".to_string(),
            node: None,
        });
    }

    errors
}

fn validate_roles(config: &ClusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let roles = [
        ("peer", &config.roles.peer),
        ("source", &config.roles.source),
        ("joining", &config.roles.joining),
    ];

    for (role, name) in roles {
        if !config.nodes.contains_key(name.as_str()) {
            errors.push(ValidationError {
                rule: "unknown-node".to_string(),
                message: format!("Role '{}' refers to node '{}' which is not configured", role, name),
                node: Some(name.clone()),
            });
        }
    }

    for (i, (role, name)) in roles.iter().enumerate() {
        if let Some((other, _)) = roles[i + 1..].iter().find(|(_, n)| n == name) {
            errors.push(ValidationError {
                rule: "duplicate-role".to_string(),
                message: format!(
                    "Roles '{}' and '{}' both refer to node '{}'",
                    role, other, name
                ),
                node: Some(name.to_string()),
            });
        }
    }

    errors
}

fn validate_nodes(config: &ClusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, node) in &config.nodes {
        let blanks = [
            ("host", &node.host),
            ("dbname", &node.dbname),
            ("user", &node.user),
        ];
        for (field, value) in blanks {
            if value.trim().is_empty() {
                errors.push(ValidationError {
                    rule: "missing-field".to_string(),
                    message: format!("Node '{}' has an empty '{}'", name, field),
                    node: Some(name.clone()),
                });
            }
        }

        if node.port == 0 {
            errors.push(ValidationError {
                rule: "invalid-port".to_string(),
                message: format!("Node '{}' has port 0", name),
                node: Some(name.clone()),
            });
        }
    }

    errors
}

fn is_slot_name_part(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn validate_slot_names(config: &ClusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for name in config.nodes.keys() {
        if !is_slot_name_part(name) {
            errors.push(ValidationError {
                rule: "invalid-name".to_string(),
                message: format!(
                    "Node name '{}' may only contain lowercase letters, digits and underscores",
                    name
                ),
                node: Some(name.clone()),
            });
        }
    }

    let source = &config.roles.source;
    if let Some(node) = config.nodes.get(source) {
        if !node.dbname.trim().is_empty() && !is_slot_name_part(&node.dbname) {
            errors.push(ValidationError {
                rule: "invalid-name".to_string(),
                message: format!(
                    "Source node '{}' has dbname '{}'; it may only contain lowercase letters, digits and underscores",
                    source, node.dbname
                ),
                node: Some(source.clone()),
            });
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &ClusterConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(SpockctrlError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
