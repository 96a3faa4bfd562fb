//! Membership command implementation.
//!
//! Adds or removes the joining node by running the selected workflow against
//! the configured cluster.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::args::Cli;
use crate::config::{load_config, ClusterConfig};
use crate::error::Result;
use crate::runner::{StepRunner, Workflow};
use crate::sql::{DryRunExecutor, PsqlExecutor, SqlExecutor};
use crate::ui::{report_progress, report_summary, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The add-node / remove-node command.
#[derive(Debug, Clone, Default)]
pub struct MembershipCommand {
    workflow: Workflow,
    config_path: Option<PathBuf>,
    pg_bin: Option<PathBuf>,
    dry_run: bool,
}

impl MembershipCommand {
    /// Create a command for `workflow` using the built-in cluster config.
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow,
            ..Default::default()
        }
    }

    /// Create the command described by the parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            workflow: cli.workflow(),
            config_path: cli.config.clone(),
            pg_bin: cli.pg_bin.clone(),
            dry_run: cli.dry_run,
        }
    }

    /// Read the cluster config from `path`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Override the PostgreSQL bin directory.
    pub fn with_pg_bin(mut self, pg_bin: impl Into<PathBuf>) -> Self {
        self.pg_bin = Some(pg_bin.into());
        self
    }

    /// Build the statements without executing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The workflow this command runs.
    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    /// Load the cluster config, applying the PostgreSQL bin override.
    pub fn load_config(&self) -> Result<ClusterConfig> {
        let mut config = load_config(self.config_path.as_deref())?;
        if let Some(pg_bin) = &self.pg_bin {
            config.pg_bin = pg_bin.clone();
        }
        Ok(config)
    }

    /// Run the workflow's steps with `executor` instead of `psql`.
    pub fn execute_with(
        &self,
        executor: &dyn SqlExecutor,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = self.load_config()?;
        self.run(&config, executor, ui)
    }

    fn run(
        &self,
        config: &ClusterConfig,
        executor: &dyn SqlExecutor,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let steps = self.workflow.steps(config)?;
        debug!(
            "Built {} workflow with {} steps",
            self.workflow,
            steps.len()
        );

        let mut header = format!(
            "spockctrl {}: {} (source {}, peer {})",
            self.workflow, config.roles.joining, config.roles.source, config.roles.peer
        );
        if self.dry_run {
            header.push_str(" [dry run]");
        }
        ui.show_header(&header);

        let outcome = StepRunner::new(executor)
            .run_with_progress(&steps, |event| report_progress(ui, &event))?;

        report_summary(ui, self.workflow, &outcome);

        match outcome.into_result() {
            Ok(_) => {
                info!("{} finished", self.workflow);
                Ok(CommandResult::success())
            }
            Err(err) => {
                ui.error(&err.to_string());
                Ok(CommandResult::failure(err.exit_code()))
            }
        }
    }
}

impl Command for MembershipCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load_config()?;

        if self.dry_run {
            return self.run(&config, &DryRunExecutor, ui);
        }

        debug!("Using psql from {}", config.pg_bin.display());
        let executor = PsqlExecutor::new(&config.pg_bin);
        self.run(&config, &executor, ui)
    }
}
