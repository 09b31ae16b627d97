//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Completion messages such as `done` (green)
    pub success: Style,
    /// Warning messages (yellow)
    pub warning: Style,
    /// Info labels (blue)
    pub info: Style,
    /// Dimmed/secondary text
    pub dim: Style,
    /// Action lines (bold)
    pub action: Style,
    /// Headers/section titles
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.action = Style::new().bold();
        self.header = Style::new().bold().cyan();
    }
}
