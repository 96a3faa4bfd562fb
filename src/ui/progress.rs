//! Step progress display.
//!
//! Each executed step produces one status line:
//!
//! ```text
//! [2025-03-01 14:02:11] [Step - 04] Wait for the apply worker to complete on n2 [IGNORED]
//! ```
//!
//! Higher verbosity adds the connection target and statement before the
//! step runs and the client's output after it. Passwords are masked in
//! everything shown, client output included.

use chrono::Local;

use crate::runner::{RunProgress, Workflow, WorkflowOutcome};
use crate::secrets::mask_passwords;
use crate::steps::StepStatus;

use super::UserInterface;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a step status line.
pub fn format_step_line(
    timestamp: &str,
    index: usize,
    description: &str,
    status: StepStatus,
) -> String {
    format!(
        "[{}] [Step - {:02}] {} [{}]",
        timestamp, index, description, status
    )
}

/// Display one progress event at the UI's verbosity.
pub fn report_progress(ui: &mut dyn UserInterface, event: &RunProgress<'_>) {
    let verbosity = ui.verbosity();

    match event {
        RunProgress::StepStarting {
            step, statement, ..
        } => {
            if verbosity.shows_target() {
                ui.detail(&format!("Executing on: {}", mask_passwords(step.target())));
            }
            if verbosity.shows_statement() {
                ui.detail(&format!("SQL Query:\n{}\n", mask_passwords(statement)));
            }
        }
        RunProgress::StepFinished {
            index,
            step,
            status,
            result,
        } => {
            if verbosity.shows_output() {
                match status {
                    StepStatus::Ok => {
                        if !result.stdout.trim().is_empty() {
                            ui.message(&mask_passwords(result.stdout.trim_end()));
                        }
                    }
                    StepStatus::Ignored => ui.warning(&mask_passwords(result.stderr.trim_end())),
                    StepStatus::Failed => ui.failure(&mask_passwords(result.stderr.trim_end())),
                }
            }

            let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
            let line = format_step_line(&timestamp, *index, step.description(), *status);
            match status {
                StepStatus::Ok => ui.success(&line),
                StepStatus::Ignored => ui.warning(&line),
                StepStatus::Failed => ui.failure(&line),
            }
        }
    }
}

/// Display the end-of-run summary.
///
/// Nothing is shown for a halted run; the caller reports the failed step.
pub fn report_summary(ui: &mut dyn UserInterface, workflow: Workflow, outcome: &WorkflowOutcome) {
    if !outcome.is_success() {
        return;
    }

    let ok = outcome.count(StepStatus::Ok);
    let ignored = outcome.count(StepStatus::Ignored);
    let step_label = if outcome.total() == 1 { "step" } else { "steps" };
    ui.message(&format!(
        "Workflow {} complete ({} {}: {} ok, {} ignored)",
        workflow,
        outcome.total(),
        step_label,
        ok,
        ignored
    ));
}
