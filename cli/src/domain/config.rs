//! Domain types and validators for hk configuration.
//!
//! Pure functions only. Nothing here touches the filesystem.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_API_URL: &str = "https://api.heroku.com";
pub const DEFAULT_GIT_HOST: &str = "heroku.com";
pub const DEFAULT_REMOTE: &str = "heroku";
pub const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 30;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.hk/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HkConfig {
    /// Platform API endpoint and credentials.
    pub api: ApiConfig,
    /// Git host used to recognise app remotes.
    pub git: GitConfig,
    /// Defaults for `apps:create`.
    pub create: CreateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Account email; fetched from the API when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            key: None,
            user: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitConfig {
    pub host: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GIT_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateConfig {
    pub remote: String,
    /// Stack requested on create; the platform default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub timeout_secs: u64,
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            stack: None,
            timeout_secs: DEFAULT_CREATE_TIMEOUT_SECS,
        }
    }
}

impl HkConfig {
    /// Overlay environment variables on top of file values.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("HEROKU_API_URL") {
            self.api.url = url;
        }
        if let Some(key) = lookup("HEROKU_API_KEY") {
            self.api.key = Some(key);
        }
        if let Some(user) = lookup("HEROKU_EMAIL") {
            self.api.user = Some(user);
        }
        if let Some(host) = lookup("HEROKU_GIT_HOST") {
            self.git.host = host;
        }
        self
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a loaded configuration.
///
/// # Errors
///
/// Returns an error if the API URL is not http(s) or the create timeout is zero.
pub fn validate_config(config: &HkConfig) -> Result<()> {
    let url = config.api.url.as_str();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::InvalidApiUrl(url.to_string()).into());
    }
    if config.create.timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout.into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
