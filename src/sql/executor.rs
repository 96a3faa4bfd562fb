//! SQL statement execution.
//!
//! Statements are run through the `psql` client, one process per
//! statement. Execution never returns an error: a client that cannot be
//! started, a connection that fails and a statement that fails all come
//! back as an [`ExecutionResult`] with a non-zero exit code.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Exit code reported when the client binary could not be started.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Result of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    /// Client exit code (-1 if killed by signal).
    pub exit_code: i32,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,
}

impl ExecutionResult {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the statement succeeded (exit code 0).
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a statement against a connection target.
///
/// Implementations block until the statement finished and report every
/// failure through the returned [`ExecutionResult`].
pub trait SqlExecutor {
    /// Execute `statement` on the database identified by `target`.
    fn execute(&self, statement: &str, target: &str) -> ExecutionResult;
}

/// Executes statements with the `psql` command-line client.
#[derive(Debug, Clone)]
pub struct PsqlExecutor {
    program: OsString,
    search_path: Option<OsString>,
}

impl PsqlExecutor {
    /// Create an executor that finds `psql` in `pg_bin` before the
    /// inherited PATH.
    pub fn new(pg_bin: &Path) -> Self {
        Self {
            program: OsString::from("psql"),
            search_path: prepend_to_path(pg_bin, std::env::var_os("PATH")),
        }
    }

    /// Use a different client binary (name or path).
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// PATH handed to the client process, if it could be built.
    pub fn search_path(&self) -> Option<&OsString> {
        self.search_path.as_ref()
    }
}

impl SqlExecutor for PsqlExecutor {
    fn execute(&self, statement: &str, target: &str) -> ExecutionResult {
        let mut cmd = Command::new(&self.program);
        cmd.arg(target).arg("-X").arg("-c").arg(statement);

        if let Some(path) = &self.search_path {
            cmd.env("PATH", path);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Failed to start {:?}: {}", self.program, e);
                return ExecutionResult::failure(
                    SPAWN_FAILURE_EXIT_CODE,
                    format!("failed to run {}: {}", self.program.to_string_lossy(), e),
                );
            }
        };

        ExecutionResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Executor for `--dry-run`: runs nothing and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl SqlExecutor for DryRunExecutor {
    fn execute(&self, _statement: &str, _target: &str) -> ExecutionResult {
        ExecutionResult::success("")
    }
}

/// Build a PATH value with `dir` in front of `current`.
///
/// Returns `None` when `dir` cannot be part of a PATH (it contains the
/// platform's separator); the inherited PATH is then left untouched.
pub fn prepend_to_path(dir: &Path, current: Option<OsString>) -> Option<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(current) = current {
        paths.extend(std::env::split_paths(&current));
    }

    match std::env::join_paths(paths) {
        Ok(joined) => Some(joined),
        Err(e) => {
            tracing::warn!("Not adding {} to PATH: {}", dir.display(), e);
            None
        }
    }
}
