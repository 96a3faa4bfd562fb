//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, SpockTheme, UserInterface, Verbosity};

/// Terminal UI implementation.
///
/// Errors go to stderr; everything else, failed steps included, goes to
/// stdout.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: SpockTheme,
    verbosity: Verbosity,
}

impl TerminalUI {
    /// Create a terminal UI, coloring output when the terminal supports it.
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_colors(verbosity, should_use_colors())
    }

    /// Create a terminal UI with colors explicitly on or off.
    pub fn with_colors(verbosity: Verbosity, colors: bool) -> Self {
        let theme = if colors {
            SpockTheme::new()
        } else {
            SpockTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            verbosity,
        }
    }
}

impl UserInterface for TerminalUI {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn detail(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.dim.apply_to(msg)).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.success.apply_to(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.warning.apply_to(msg)).ok();
    }

    fn failure(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.error.apply_to(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.error.apply_to(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "{}", self.theme.header.apply_to(title)).ok();
    }
}
