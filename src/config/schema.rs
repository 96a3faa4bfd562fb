//! Configuration schema definitions for spockctrl.
//!
//! This module contains the struct definitions that map to the YAML
//! cluster configuration file. Every field has a default so an empty
//! file (or no file at all) describes the stock three-node test cluster.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure for a cluster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Directory containing the `psql` binary; prepended to the client's PATH.
    pub pg_bin: PathBuf,

    /// Location recorded for a newly created node.
    pub location: String,

    /// Country recorded for a newly created node.
    pub country: String,

    /// Timeout passed to `spock.wait_for_sync_event`, in milliseconds.
    pub sync_event_timeout_ms: u64,

    /// Timeout passed to `spock.wait_for_apply_worker`, in milliseconds.
    pub apply_worker_timeout_ms: u64,

    /// Replication sets attached to every subscription created.
    pub replication_sets: Vec<String>,

    /// Which configured node plays which part in a membership change.
    pub roles: NodeRoles,

    /// Connection parameters, keyed by node name.
    pub nodes: BTreeMap<String, NodeConfig>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        let nodes = [("n1", 5431), ("n2", 5432), ("n3", 5433)]
            .into_iter()
            .map(|(name, port)| (name.to_string(), NodeConfig::local(port)))
            .collect();

        Self {
            pg_bin: PathBuf::from("/usr/local/pgsql.17/bin"),
            location: "Los Angeles".to_string(),
            country: "USA".to_string(),
            sync_event_timeout_ms: 1_200_000,
            apply_worker_timeout_ms: 1_000,
            replication_sets: vec![
                "default".to_string(),
                "default_insert_only".to_string(),
                "ddl_sql".to_string(),
            ],
            roles: NodeRoles::default(),
            nodes,
        }
    }
}

impl ClusterConfig {
    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&NodeConfig> {
        self.nodes.get(name)
    }
}

/// Node roles in an add/remove workflow.
///
/// - `peer`: existing node that only exchanges subscriptions with the
///   joining node
/// - `source`: existing node the joining node copies its initial state from
/// - `joining`: the node being added or removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeRoles {
    pub peer: String,
    pub source: String,
    pub joining: String,
}

impl Default for NodeRoles {
    fn default() -> Self {
        Self {
            peer: "n1".to_string(),
            source: "n2".to_string(),
            joining: "n3".to_string(),
        }
    }
}

/// Connection parameters for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::local(5432)
    }
}

impl NodeConfig {
    fn local(port: u16) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
            dbname: "pgedge".to_string(),
            user: "pgedge".to_string(),
            password: "pgedge".to_string(),
        }
    }

    /// Render a libpq keyword/value connection string.
    ///
    /// Values that are empty or contain whitespace, quotes or backslashes
    /// are single-quoted with `\'` and `\\` escapes.
    pub fn dsn(&self) -> String {
        format!(
            "host={} dbname={} port={} user={} password={}",
            conninfo_value(&self.host),
            conninfo_value(&self.dbname),
            self.port,
            conninfo_value(&self.user),
            conninfo_value(&self.password)
        )
    }
}

fn conninfo_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}
