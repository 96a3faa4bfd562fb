//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use spockctrl::ui::{MockUI, UserInterface, Verbosity};
//!
//! let mut ui = MockUI::with_verbosity(Verbosity::Output);
//! ui.message("Executing on: host=a");
//! ui.error("Step failed: Drop node n3");
//!
//! assert!(ui.has_message("host=a"));
//! assert!(ui.has_error("Drop node n3"));
//! ```

use super::{UserInterface, Verbosity};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    verbosity: Verbosity,
    messages: Vec<String>,
    details: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    failures: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI at the lowest verbosity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific verbosity.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured detail lines.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured failed-step lines.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific detail line was shown.
    pub fn has_detail(&self, msg: &str) -> bool {
        self.details.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific failed-step line was shown.
    pub fn has_failure(&self, msg: &str) -> bool {
        self.failures.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific header was shown.
    pub fn has_header(&self, title: &str) -> bool {
        self.headers.iter().any(|h| h.contains(title))
    }

    /// Check if anything at all contains `text`.
    pub fn shown_anywhere(&self, text: &str) -> bool {
        [
            &self.messages,
            &self.details,
            &self.successes,
            &self.warnings,
            &self.failures,
            &self.errors,
            &self.headers,
        ]
        .iter()
        .any(|lines| lines.iter().any(|m| m.contains(text)))
    }
}

impl UserInterface for MockUI {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        self.details.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn failure(&mut self, msg: &str) {
        self.failures.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_by_kind() {
        let mut ui = MockUI::new();
        ui.message("m");
        ui.detail("d");
        ui.success("s");
        ui.warning("w");
        ui.failure("f");
        ui.error("e");
        ui.show_header("h");

        assert_eq!(ui.messages(), ["m"]);
        assert_eq!(ui.details(), ["d"]);
        assert_eq!(ui.successes(), ["s"]);
        assert_eq!(ui.warnings(), ["w"]);
        assert_eq!(ui.failures(), ["f"]);
        assert_eq!(ui.errors(), ["e"]);
        assert_eq!(ui.headers(), ["h"]);
        assert!(ui.shown_anywhere("h"));
        assert!(!ui.shown_anywhere("x"));
    }

    #[test]
    fn reports_configured_verbosity() {
        assert_eq!(MockUI::new().verbosity(), Verbosity::Steps);
        assert_eq!(
            MockUI::with_verbosity(Verbosity::Statements).verbosity(),
            Verbosity::Statements
        );
    }
}
