//! Sequential step execution.
//!
//! [`StepRunner`] executes a list of [`Step`]s strictly in order. Before a
//! step runs, the outputs captured from earlier steps are substituted into
//! its statement. A failing step either records an empty output and lets
//! the run continue (ignorable steps) or halts the run.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Result, SpockctrlError};
use crate::secrets::mask_passwords;
use crate::sql::{ExecutionResult, SqlExecutor};
use crate::steps::{extract_output, resolve_placeholders, validate_references, Step, StepStatus};

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to execute.
    StepStarting {
        /// 1-based step index.
        index: usize,
        total: usize,
        step: &'a Step,
        /// Statement with placeholders resolved.
        statement: &'a str,
    },
    /// A step finished.
    StepFinished {
        index: usize,
        step: &'a Step,
        status: StepStatus,
        result: &'a ExecutionResult,
    },
}

/// Record of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// 1-based step index.
    pub index: usize,
    pub description: String,
    pub status: StepStatus,
    pub exit_code: i32,
}

/// The step that halted a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedStep {
    pub index: usize,
    pub description: String,
    pub stderr: String,
}

/// Result of running a step list.
#[derive(Debug, Clone, Default)]
pub struct WorkflowOutcome {
    records: Vec<StepRecord>,
    outputs: BTreeMap<usize, String>,
    failure: Option<FailedStep>,
    total: usize,
}

impl WorkflowOutcome {
    /// Executed steps, in execution order.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Captured outputs keyed by step index.
    ///
    /// Ignored steps map to an empty string; steps after a halt are absent.
    pub fn outputs(&self) -> &BTreeMap<usize, String> {
        &self.outputs
    }

    /// Captured output of one step.
    pub fn output(&self, index: usize) -> Option<&str> {
        self.outputs.get(&index).map(String::as_str)
    }

    /// The step that halted the run, if any.
    pub fn failure(&self) -> Option<&FailedStep> {
        self.failure.as_ref()
    }

    /// Whether every step ran without a fatal failure.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of steps in the list that was run.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of executed steps with the given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Convert into the captured outputs, or the halting step as an error.
    pub fn into_result(self) -> Result<BTreeMap<usize, String>> {
        match self.failure {
            Some(failed) => Err(SpockctrlError::StepFailed {
                index: failed.index,
                description: failed.description,
                stderr: failed.stderr,
            }),
            None => Ok(self.outputs),
        }
    }
}

/// Executes step lists against a [`SqlExecutor`].
pub struct StepRunner<'a> {
    executor: &'a dyn SqlExecutor,
}

impl<'a> StepRunner<'a> {
    /// Create a new step runner.
    pub fn new(executor: &'a dyn SqlExecutor) -> Self {
        Self { executor }
    }

    /// Run the steps without progress reporting.
    pub fn run(&self, steps: &[Step]) -> Result<WorkflowOutcome> {
        self.run_with_progress(steps, |_| {})
    }

    /// Run the steps, reporting each one to `on_progress`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` without executing anything if a step
    /// refers to its own output or to a later step. A failing step is not
    /// an error here; it is recorded in the returned outcome.
    pub fn run_with_progress(
        &self,
        steps: &[Step],
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<WorkflowOutcome> {
        validate_references(steps)?;

        let total = steps.len();
        let mut outcome = WorkflowOutcome {
            total,
            ..Default::default()
        };

        for (position, step) in steps.iter().enumerate() {
            let index = position + 1;
            let statement = resolve_placeholders(step.statement(), &outcome.outputs);

            debug!(
                "Step {}/{} on {}: {}",
                index,
                total,
                mask_passwords(step.target()),
                step.description()
            );

            on_progress(RunProgress::StepStarting {
                index,
                total,
                step,
                statement: &statement,
            });

            let result = self.executor.execute(&statement, step.target());

            let status = if result.is_success() {
                outcome.outputs.insert(index, extract_output(&result.stdout));
                StepStatus::Ok
            } else if step.is_ignorable() {
                debug!("Step {} failed with exit code {}, ignoring", index, result.exit_code);
                outcome.outputs.insert(index, String::new());
                StepStatus::Ignored
            } else {
                warn!("Step {} failed with exit code {}", index, result.exit_code);
                StepStatus::Failed
            };

            outcome.records.push(StepRecord {
                index,
                description: step.description().to_string(),
                status,
                exit_code: result.exit_code,
            });

            on_progress(RunProgress::StepFinished {
                index,
                step,
                status,
                result: &result,
            });

            if !status.continues() {
                outcome.failure = Some(FailedStep {
                    index,
                    description: step.description().to_string(),
                    stderr: result.stderr,
                });
                break;
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::MockExecutor;

    fn step(n: usize, statement: &str) -> Step {
        Step::new(format!("step {}", n), statement, format!("host=node{}", n))
    }

    #[test]
    fn runs_steps_in_order() {
        let executor = MockExecutor::new();
        let steps: Vec<_> = (1..=4).map(|n| step(n, &format!("SELECT {};", n))).collect();

        let outcome = StepRunner::new(&executor).run(&steps).unwrap();

        let statements: Vec<_> = executor.calls().into_iter().map(|c| c.statement).collect();
        assert_eq!(
            statements,
            vec!["SELECT 1;", "SELECT 2;", "SELECT 3;", "SELECT 4;"]
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.count(StepStatus::Ok), 4);
        assert_eq!(outcome.total(), 4);
    }

    #[test]
    fn passes_each_step_target() {
        let executor = MockExecutor::new();
        let steps = vec![step(1, "SELECT 1;"), step(2, "SELECT 2;")];

        StepRunner::new(&executor).run(&steps).unwrap();

        let targets: Vec<_> = executor.calls().into_iter().map(|c| c.target).collect();
        assert_eq!(targets, vec!["host=node1", "host=node2"]);
    }

    #[test]
    fn threads_outputs_into_later_steps() {
        let executor = MockExecutor::new()
            .with_response(ExecutionResult::success(" sync_event\n------------\n 0/3000060\n(1 row)\n"))
            .with_response(ExecutionResult::success("CALL\n"));
        let steps = vec![
            step(1, "SELECT spock.sync_event();"),
            step(2, "CALL wait($1::pg_lsn);"),
        ];

        let outcome = StepRunner::new(&executor).run(&steps).unwrap();

        assert_eq!(executor.calls()[1].statement, "CALL wait('0/3000060'::pg_lsn);");
        assert_eq!(outcome.output(1), Some("'0/3000060'"));
        assert_eq!(outcome.output(2), Some("CALL"));
    }

    #[test]
    fn ten_and_one_do_not_collide() {
        let mut executor = MockExecutor::new();
        for n in 1..=10 {
            executor = executor.with_response(ExecutionResult::success(format!("v{}\n", n)));
        }
        let mut steps: Vec<_> = (1..=10).map(|n| step(n, "SELECT 1;")).collect();
        steps.push(step(11, "SELECT $10, $1;"));

        StepRunner::new(&executor).run(&steps).unwrap();

        assert_eq!(executor.calls()[10].statement, "SELECT v10, v1;");
    }

    #[test]
    fn fatal_failure_halts_the_run() {
        let executor = MockExecutor::new()
            .with_response(ExecutionResult::success("1\n"))
            .with_response(ExecutionResult::failure(2, "ERROR: relation missing"));
        let steps = vec![
            step(1, "SELECT 1;"),
            step(2, "SELECT 2;"),
            step(3, "SELECT 3;"),
        ];

        let outcome = StepRunner::new(&executor).run(&steps).unwrap();

        assert_eq!(executor.call_count(), 2);
        assert!(!outcome.is_success());
        let failed = outcome.failure().unwrap();
        assert_eq!(failed.index, 2);
        assert_eq!(failed.description, "step 2");
        assert_eq!(failed.stderr, "ERROR: relation missing");
        assert_eq!(outcome.records().last().unwrap().status, StepStatus::Failed);
        assert_eq!(outcome.output(2), None);
        assert_eq!(outcome.output(3), None);
    }

    #[test]
    fn ignorable_failure_stores_empty_output_and_continues() {
        let executor = MockExecutor::new()
            .with_response(ExecutionResult::failure(1, "ERROR: timeout"))
            .with_response(ExecutionResult::success("ok\n"));
        let steps = vec![step(1, "SELECT 1;").ignorable(), step(2, "SELECT f('$1');")];

        let outcome = StepRunner::new(&executor).run(&steps).unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.output(1), Some(""));
        assert_eq!(executor.calls()[1].statement, "SELECT f('');");
        assert_eq!(outcome.records()[0].status, StepStatus::Ignored);
        assert_eq!(outcome.records()[0].exit_code, 1);
    }

    #[test]
    fn all_ignorable_failures_complete_the_run() {
        let executor = MockExecutor::failing();
        let steps: Vec<_> = (1..=5).map(|n| step(n, "SELECT 1;").ignorable()).collect();

        let outcome = StepRunner::new(&executor).run(&steps).unwrap();

        assert_eq!(executor.call_count(), 5);
        assert!(outcome.is_success());
        assert_eq!(outcome.count(StepStatus::Ignored), 5);
    }

    #[test]
    fn forward_reference_executes_nothing() {
        let executor = MockExecutor::new();
        let steps = vec![step(1, "SELECT 1;"), step(2, "SELECT $3;"), step(3, "SELECT 3;")];

        let result = StepRunner::new(&executor).run(&steps);

        assert!(matches!(
            result,
            Err(SpockctrlError::ConfigValidationError { .. })
        ));
        assert_eq!(executor.call_count(), 0);
    }

    #[test]
    fn progress_events_bracket_each_step() {
        let executor = MockExecutor::new().with_response(ExecutionResult::success("x\n"));
        let steps = vec![step(1, "SELECT 1;"), step(2, "SELECT '$1';")];
        let mut events = Vec::new();

        StepRunner::new(&executor)
            .run_with_progress(&steps, |event| match event {
                RunProgress::StepStarting {
                    index, statement, ..
                } => events.push(format!("start {} {}", index, statement)),
                RunProgress::StepFinished { index, status, .. } => {
                    events.push(format!("finish {} {}", index, status))
                }
            })
            .unwrap();

        assert_eq!(
            events,
            vec![
                "start 1 SELECT 1;",
                "finish 1 OK",
                "start 2 SELECT 'x';",
                "finish 2 OK"
            ]
        );
    }

    #[test]
    fn into_result_surfaces_failed_step() {
        let executor = MockExecutor::failing();
        let steps = vec![step(1, "SELECT 1;")];

        let err = StepRunner::new(&executor)
            .run(&steps)
            .unwrap()
            .into_result()
            .unwrap_err();

        match err {
            SpockctrlError::StepFailed {
                index,
                description,
                stderr,
            } => {
                assert_eq!(index, 1);
                assert_eq!(description, "step 1");
                assert!(stderr.contains("mock failure"));
            }
            other => panic!("expected step failure, got {:?}", other),
        }
    }

    #[test]
    fn empty_step_list_succeeds() {
        let executor = MockExecutor::new();
        let outcome = StepRunner::new(&executor).run(&[]).unwrap();
        assert!(outcome.is_success());
        assert!(outcome.outputs().is_empty());
    }
}
