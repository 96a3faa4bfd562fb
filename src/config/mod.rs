//! Cluster configuration for spockctrl.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use spockctrl::config::{parse_config, validate};
//! use std::path::Path;
//!
//! let yaml = "roles:\n  joining: n3\nlocation: Paris\n";
//! let config = parse_config(yaml, Path::new("cluster.yml")).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.location, "Paris");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_file, parse_config};
pub use schema::{ClusterConfig, NodeConfig, NodeRoles};
pub use validator::{validate, validate_config, ValidationError};
