//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::runner::Workflow;
use crate::ui::Verbosity;

/// spockctrl - Add or remove a node in a Spock replication cluster.
#[derive(Debug, Parser)]
#[command(name = "spockctrl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Add the joining node to the cluster (default)
    #[arg(short, long)]
    pub add_node: bool,

    /// Remove the joining node from the cluster
    #[arg(short, long, conflicts_with = "add_node")]
    pub remove_node: bool,

    /// Verbosity: 0 = step status, 1 = targets and output, 2 = statements
    #[arg(short, long, value_name = "LEVEL", default_value = "0")]
    pub verbose: Verbosity,

    /// Path to a cluster config file
    #[arg(short, long, env = "SPOCKCTRL_CONFIG")]
    pub config: Option<PathBuf>,

    /// PostgreSQL bin directory (overrides the config file)
    #[arg(long, value_name = "DIR", env = "SPOCKCTRL_PG_BIN")]
    pub pg_bin: Option<PathBuf>,

    /// Print the workflow without executing any statement
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The workflow selected by the flags.
    pub fn workflow(&self) -> Workflow {
        if self.remove_node {
            Workflow::RemoveNode
        } else {
            Workflow::AddNode
        }
    }

    /// Verbosity to display with.
    ///
    /// A dry run always shows the statements it would have executed.
    pub fn effective_verbosity(&self) -> Verbosity {
        if self.dry_run {
            self.verbose.max(Verbosity::Statements)
        } else {
            self.verbose
        }
    }
}
