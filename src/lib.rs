//! spockctrl - Spock cluster membership control.
//!
//! spockctrl adds a node to, or removes a node from, a Spock logical
//! replication cluster by running a fixed sequence of SQL calls against the
//! cluster's nodes. Later calls may use values returned by earlier ones
//! through `$<n>` placeholders.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Cluster configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Sequential step execution and the membership workflows
//! - [`secrets`] - Password masking for displayed connection strings
//! - [`sql`] - Statement execution and statement templates
//! - [`steps`] - Steps, placeholder substitution and output extraction
//! - [`ui`] - Terminal output and progress reporting
//!
//! # Example
//!
//! ```
//! use spockctrl::config::ClusterConfig;
//! use spockctrl::runner::{StepRunner, Workflow};
//! use spockctrl::sql::MockExecutor;
//!
//! let steps = Workflow::RemoveNode.steps(&ClusterConfig::default()).unwrap();
//! let executor = MockExecutor::failing();
//!
//! // Every remove-node step is ignorable.
//! let outcome = StepRunner::new(&executor).run(&steps).unwrap();
//! assert!(outcome.is_success());
//! assert_eq!(executor.call_count(), 5);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod secrets;
pub mod sql;
pub mod steps;
pub mod ui;

pub use error::{Result, SpockctrlError};
