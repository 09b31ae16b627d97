//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never interleave with rendered command output.
//! Filter precedence: `HK_LOG`, then `RUST_LOG`, then the `-v` count.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive for hk.
pub const LOG_ENV: &str = "HK_LOG";

/// Default directive for a given number of `-v` flags.
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "hk_cli=debug,info",
        _ => "trace",
    }
}

/// Resolve the filter from the environment, falling back to `verbose`.
#[must_use]
pub fn build_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: u8, no_color: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(verbose > 1)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot initialise logging: {e}"))
}
