//! Integration tests for the workflow public API.

use spockctrl::config::{parse_config, ClusterConfig};
use spockctrl::runner::{StepRunner, Workflow};
use spockctrl::sql::{ExecutionResult, MockExecutor};
use spockctrl::steps::{Step, StepStatus};
use spockctrl::SpockctrlError;
use std::path::Path;

fn add_node_steps() -> Vec<Step> {
    Workflow::AddNode.steps(&ClusterConfig::default()).unwrap()
}

#[test]
fn add_node_substitutes_subscription_into_apply_worker_wait() {
    let executor = MockExecutor::new()
        .with_response(ExecutionResult::success(" node_create\n-------------\n 49708\n(1 row)\n"))
        .with_response(ExecutionResult::success(" sub_create\n------------\n 3421\n(1 row)\n"));
    let steps = add_node_steps();

    let outcome = StepRunner::new(&executor).run(&steps).unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.output(2), Some("3421"));
    assert_eq!(
        executor.calls()[3].statement,
        "SELECT spock.wait_for_apply_worker(3421, 1000);"
    );
}

#[test]
fn add_node_continues_after_apply_worker_wait_fails() {
    let executor = MockExecutor::new()
        .with_response(ExecutionResult::success(""))
        .with_response(ExecutionResult::success(" 3421\n(1 row)\n"))
        .with_response(ExecutionResult::success(""))
        .with_response(ExecutionResult::failure(1, "ERROR: timed out"))
        .with_response(ExecutionResult::success(""))
        .with_response(ExecutionResult::success(""))
        .with_response(ExecutionResult::success(" sync_event\n------------\n 0/1A2B3C4\n(1 row)\n"));
    let steps = add_node_steps();

    let outcome = StepRunner::new(&executor).run(&steps).unwrap();

    assert!(outcome.is_success());
    assert_eq!(executor.call_count(), 11);
    assert_eq!(outcome.records()[3].status, StepStatus::Ignored);
    assert_eq!(outcome.output(4), Some(""));
    assert_eq!(outcome.count(StepStatus::Ok), 10);

    assert_eq!(outcome.output(7), Some("'0/1A2B3C4'"));
    assert_eq!(
        executor.calls()[7].statement,
        "CALL spock.wait_for_sync_event(true, 'n2', '0/1A2B3C4'::pg_lsn, 1200000);"
    );
}

#[test]
fn add_node_halts_on_first_fatal_failure() {
    let executor = MockExecutor::new()
        .with_response(ExecutionResult::success(""))
        .with_response(ExecutionResult::failure(3, "ERROR: subscription exists"));
    let steps = add_node_steps();

    let outcome = StepRunner::new(&executor).run(&steps).unwrap();

    assert!(!outcome.is_success());
    assert_eq!(executor.call_count(), 2);
    assert_eq!(outcome.records().len(), 2);
    assert!(outcome.output(3).is_none());

    match outcome.into_result() {
        Err(SpockctrlError::StepFailed { index, stderr, .. }) => {
            assert_eq!(index, 2);
            assert_eq!(stderr, "ERROR: subscription exists");
        }
        other => panic!("expected StepFailed, got {:?}", other),
    }
}

#[test]
fn remove_node_runs_every_step_even_when_all_fail() {
    let executor = MockExecutor::failing();
    let steps = Workflow::RemoveNode
        .steps(&ClusterConfig::default())
        .unwrap();

    let outcome = StepRunner::new(&executor).run(&steps).unwrap();

    assert!(outcome.is_success());
    assert_eq!(executor.call_count(), 5);
    assert_eq!(outcome.count(StepStatus::Ignored), 5);
    assert!(outcome.outputs().values().all(String::is_empty));
}

#[test]
fn ten_and_more_steps_do_not_collide_with_single_digit_placeholders() {
    let mut executor = MockExecutor::new();
    for n in 1..=10 {
        executor = executor.with_response(ExecutionResult::success(format!(" v{}\n(1 row)\n", n)));
    }
    let mut steps: Vec<Step> = (1..=10)
        .map(|n| Step::new(format!("step {}", n), format!("SELECT {};", n), "host=a"))
        .collect();
    steps.push(Step::new("combine", "SELECT $1, $10, $1x;", "host=a"));

    StepRunner::new(&executor).run(&steps).unwrap();

    assert_eq!(executor.calls()[10].statement, "SELECT v1, v10, v1x;");
}

#[test]
fn forward_references_are_rejected_before_execution() {
    let executor = MockExecutor::new();
    let steps = vec![
        Step::new("first", "SELECT $2;", "host=a"),
        Step::new("second", "SELECT 2;", "host=a"),
    ];

    let err = StepRunner::new(&executor).run(&steps).unwrap_err();

    assert!(matches!(err, SpockctrlError::ConfigValidationError { .. }));
    assert_eq!(executor.call_count(), 0);
}

#[test]
fn roles_from_config_drive_targets_and_names() {
    let yaml = r#"
roles:
  peer: alpha
  source: beta
  joining: gamma
nodes:
  alpha: { host: 10.0.0.1, port: 5432 }
  beta: { host: 10.0.0.2, port: 5432 }
  gamma: { host: 10.0.0.3, port: 5432 }
"#;
    let config = parse_config(yaml, Path::new("cluster.yml")).unwrap();

    let steps = Workflow::RemoveNode.steps(&config).unwrap();

    assert!(steps[0].statement().contains("sub_beta_gamma"));
    assert!(steps[0].target().starts_with("host=10.0.0.3 "));
    assert_eq!(steps[4].description(), "Drop node gamma");
}
