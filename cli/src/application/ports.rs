//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;

use crate::domain::{AppInfo, AppSummary, CreatedApp, HkConfig, Process, ProcessTarget};

// ── Platform API Port Traits ──────────────────────────────────────────────────

/// App-level operations: list, inspect, create, rename, destroy.
#[allow(async_fn_in_trait)]
pub trait AppsApi {
    /// Email of the account the API key belongs to.
    async fn user(&self) -> Result<String>;
    /// Every app the account can see, with its owner.
    async fn list_apps(&self) -> Result<Vec<AppSummary>>;
    /// Full record for one app.
    async fn app_info(&self, app: &str) -> Result<AppInfo>;
    /// Request a new app. `None` lets the platform pick the name or stack.
    async fn create_app(&self, name: Option<&str>, stack: Option<&str>) -> Result<CreatedApp>;
    /// Whether provisioning of a freshly created app has finished.
    async fn create_complete(&self, app: &str) -> Result<bool>;
    /// Rename `app` to `new_name`.
    async fn rename_app(&self, app: &str, new_name: &str) -> Result<()>;
    /// Permanently destroy the app and its add-ons.
    async fn destroy_app(&self, app: &str) -> Result<()>;
    /// Attach an add-on to the app.
    async fn install_addon(&self, app: &str, addon: &str) -> Result<()>;
    /// Merge the given variables into the app's config vars.
    async fn add_config_vars(&self, app: &str, vars: &BTreeMap<String, String>) -> Result<()>;
}

/// Process-level operations: list, restart, scale, stop.
#[allow(async_fn_in_trait)]
pub trait ProcessApi {
    /// Running processes of the app.
    async fn processes(&self, app: &str) -> Result<Vec<Process>>;
    /// Restart the targeted processes.
    async fn restart(&self, app: &str, target: &ProcessTarget) -> Result<()>;
    /// Scale a process type; returns the new quantity as reported.
    async fn scale(&self, app: &str, process_type: &str, qty: &str) -> Result<String>;
    /// Stop the targeted processes.
    async fn stop(&self, app: &str, target: &ProcessTarget) -> Result<()>;
    /// Set the legacy dyno count; returns the count now running.
    async fn set_dynos(&self, app: &str, qty: &str) -> Result<u64>;
    /// Set the legacy worker count; returns the count now running.
    async fn set_workers(&self, app: &str, qty: &str) -> Result<u64>;
}

/// Composite trait: any type implementing both sub-traits is a `PlatformApi`.
pub trait PlatformApi: AppsApi + ProcessApi {}

/// Blanket implementation: any type implementing both sub-traits is a `PlatformApi`.
impl<T> PlatformApi for T where T: AppsApi + ProcessApi {}

// ── Git Port ──────────────────────────────────────────────────────────────────

/// Git remote bookkeeping for the current working directory.
#[allow(async_fn_in_trait)]
pub trait GitRemotes {
    /// Remote name → app name for remotes on the platform git host.
    ///
    /// Returns `None` when the working directory is not a git repository.
    async fn remotes(&self) -> Result<Option<BTreeMap<String, String>>>;
    /// Add a remote named `name` pointing at `url`.
    async fn add_remote(&self, name: &str, url: &str) -> Result<()>;
    /// Remove the remote named `name`.
    async fn remove_remote(&self, name: &str) -> Result<()>;
}

// ── Browser Port ──────────────────────────────────────────────────────────────

/// Opens URLs in the user's default browser.
#[allow(async_fn_in_trait)]
pub trait BrowserLauncher {
    /// Open `url`; returns once the opener has been launched.
    async fn open(&self, url: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Start a program detached and return without waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn spawn(&self, program: &str, args: &[&str]) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. The trait is sync.
pub trait ProgressReporter {
    /// Start an action line, left open for `tick` marks and a `done` message.
    fn action(&self, message: &str);
    /// Start an unmarked line, left open for a `done` message.
    fn partial(&self, message: &str);
    /// Emit one progress mark on the open action line.
    fn tick(&self);
    /// Complete the open action line with `message`.
    fn done(&self, message: &str);
    /// Emit a standalone informational line.
    fn line(&self, message: &str);
    /// Emit a warning line.
    fn warn(&self, message: &str);
}

// ── Interaction Port ──────────────────────────────────────────────────────────

/// Asks the user to confirm destructive actions.
pub trait Prompter {
    /// Show `warning` and ask the user to type `expected` to proceed.
    ///
    /// # Errors
    ///
    /// Returns an error if no terminal is available to ask.
    fn confirm_destructive(&self, expected: &str, warning: &str) -> Result<bool>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration loading.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<HkConfig>;
    /// Path of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
