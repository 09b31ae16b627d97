//! `TerminalReporter`, the terminal implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `action()` prints `"* {message} "` and leaves the line open
/// - `tick()` prints `"."` on the open line
/// - `done()` completes the line
///
/// Everything is dropped when `silent` is set (JSON mode) or `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    silent: bool,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext, silent: bool) -> Self {
        Self { ctx, silent }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn action(&self, message: &str) {
        if !self.silent {
            self.ctx.action(message);
        }
    }

    fn partial(&self, message: &str) {
        if !self.silent {
            self.ctx.partial(message);
        }
    }

    fn tick(&self) {
        if !self.silent {
            self.ctx.partial(".");
        }
    }

    fn done(&self, message: &str) {
        if !self.silent {
            self.ctx.done(message);
        }
    }

    fn line(&self, message: &str) {
        if !self.silent {
            self.ctx.line(message);
        }
    }

    fn warn(&self, message: &str) {
        if self.silent {
            tracing::warn!("{message}");
        } else {
            self.ctx.warn(message);
        }
    }
}
