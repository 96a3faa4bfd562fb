//! Step descriptors.

use std::fmt;

/// One administrative statement in a workflow.
///
/// Steps are identified by their 1-based position in the list they belong
/// to. The statement may reference outputs of earlier steps with `$<n>`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    description: String,
    statement: String,
    target: String,
    ignorable: bool,
}

impl Step {
    /// Create a step whose failure aborts the run.
    pub fn new(
        description: impl Into<String>,
        statement: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            statement: statement.into(),
            target: target.into(),
            ignorable: false,
        }
    }

    /// Mark this step as allowed to fail.
    pub fn ignorable(mut self) -> Self {
        self.ignorable = true;
        self
    }

    /// Human-readable description shown in progress lines.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Statement template, possibly containing placeholders.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Connection target (a libpq connection string).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether a failure of this step is tolerated.
    pub fn is_ignorable(&self) -> bool {
        self.ignorable
    }
}

/// Outcome of a single executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Statement succeeded.
    Ok,

    /// Statement failed but the step is ignorable.
    Ignored,

    /// Statement failed and halted the run.
    Failed,
}

impl StepStatus {
    /// Whether the run continues after a step with this status.
    pub fn continues(&self) -> bool {
        !matches!(self, StepStatus::Failed)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Ok => "OK",
            StepStatus::Ignored => "IGNORED",
            StepStatus::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}
