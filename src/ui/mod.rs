//! Operator-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for tests
//! - Step progress and summary reporting
//!
//! # Example
//!
//! ```
//! use spockctrl::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("spockctrl add-node");
//! ui.success("[Step - 01] Create node n3 in the cluster [OK]");
//! assert!(ui.has_success("[OK]"));
//! ```

pub mod mock;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::Verbosity;
pub use progress::{format_step_line, report_progress, report_summary};
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, SpockTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current verbosity.
    fn verbosity(&self) -> Verbosity;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display secondary detail such as a connection target or statement.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display a failed step alongside the other step lines.
    fn failure(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a section header.
    fn show_header(&mut self, title: &str);
}
