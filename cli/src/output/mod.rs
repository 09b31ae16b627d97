//! Output formatting module

pub mod human;
pub mod json;
pub mod raw;
pub mod reporter;
pub mod styles;

use std::io::Write as _;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::Displayable;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a section header as `=== msg`. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("{}", format!("=== {msg}").style(self.styles.header));
        }
    }

    /// Print an info label as `+ msg: `. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}: ", "+".style(self.styles.info));
        }
    }

    /// Print a warning as `  ~ msg`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "~".style(self.styles.warning));
        }
    }

    /// Start an action line as `* msg ` without a newline. Suppressed when `quiet`.
    pub fn action(&self, msg: &str) {
        if !self.quiet {
            print!("{} {} ", "*".style(self.styles.action), msg.style(self.styles.action));
            flush();
        }
    }

    /// Print text without a newline. Suppressed when `quiet`.
    pub fn partial(&self, msg: &str) {
        if !self.quiet {
            print!("{msg}");
            flush();
        }
    }

    /// Print a plain line. Suppressed when `quiet`.
    pub fn line(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Print a completion message such as `done`. Suppressed when `quiet`.
    pub fn done(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.style(self.styles.success));
        }
    }

    /// Print an object in the human layout.
    pub fn object(&self, obj: &Displayable) {
        HumanRenderer::new(self).render(obj);
    }
}

fn flush() {
    let _ = std::io::stdout().flush();
}

/// One of the three interchangeable output styles.
pub enum Renderer<'a> {
    /// Styled terminal layout.
    Human(HumanRenderer<'a>),
    /// `key=value` lines.
    Raw,
    /// Pretty-printed JSON.
    Json,
}

impl Renderer<'_> {
    /// Print `obj` in this renderer's style.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, obj: &Displayable) -> Result<()> {
        match self {
            Self::Human(h) => h.render(obj),
            Self::Raw => raw::render(obj),
            Self::Json => json::render(obj)?,
        }
        Ok(())
    }
}
