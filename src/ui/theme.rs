//! Visual theme and styling.

use console::Style;

/// spockctrl's visual theme.
#[derive(Debug, Clone)]
pub struct SpockTheme {
    /// Style for successful steps (green).
    pub success: Style,
    /// Style for ignored failures (yellow).
    pub warning: Style,
    /// Style for fatal failures (red bold).
    pub error: Style,
    /// Style for secondary text such as targets and statements (dim).
    pub dim: Style,
    /// Style for headers (bold).
    pub header: Style,
}

impl Default for SpockTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SpockTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
