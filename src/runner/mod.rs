//! Workflow construction and step execution.

pub mod membership;
pub mod workflow;

pub use membership::{add_node_workflow, remove_node_workflow, Workflow};
pub use workflow::{FailedStep, RunProgress, StepRecord, StepRunner, WorkflowOutcome};
