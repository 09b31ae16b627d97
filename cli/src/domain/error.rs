//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Command errors ────────────────────────────────────────────────────────────

/// User-facing command failures raised before or around an API call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Missing or malformed arguments; the message is the usage hint.
    #[error("{0}")]
    Usage(String),

    /// App creation did not reach `complete` before the client-side timeout.
    #[error("Timed Out! Check heroku status for known issues.")]
    TimedOut,

    #[error("Confirmed app {confirmed} did not match the selected app {app}.")]
    ConfirmMismatch { confirmed: String, app: String },

    #[error(
        "No app specified.\nRun this command from an app folder or specify which app to use with --app APP."
    )]
    NoApp,

    #[error("{0}")]
    Unsupported(String),
}

impl CommandError {
    /// Short machine-readable code used by the JSON error object.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) | Self::NoApp => "usage",
            Self::TimedOut => "timeout",
            Self::ConfirmMismatch { .. } => "confirm_mismatch",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

// ── API errors ────────────────────────────────────────────────────────────────

/// Failures returned by the platform API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not logged in. Set HEROKU_API_KEY or api.key in {config}.")]
    MissingCredentials { config: String },

    #[error("Access denied. Check your API key.")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("cannot reach the platform API: {0}")]
    Transport(String),

    #[error("unexpected API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short machine-readable code used by the JSON error object.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredentials { .. } | Self::Unauthorized => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Status { .. } => "api_error",
            Self::Transport(_) => "network",
            Self::Decode(_) => "decode",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL '{0}': must start with http:// or https://")]
    InvalidApiUrl(String),

    #[error("Invalid create timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// Map any error chain to the JSON error code of its first typed cause.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CommandError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<ApiError>() {
            return e.code();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "config";
        }
    }
    "error"
}
