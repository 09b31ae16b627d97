//! App use-cases: list, info, create, rename, open, destroy.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{
    AppsApi, BrowserLauncher, GitRemotes, ProgressReporter, Prompter,
};
use crate::domain::app::partition_apps;
use crate::domain::git::{git_url_for, remotes_for_app};
use crate::domain::{AppInfo, CommandError, CreatedApp};

/// Interval between creation-status polls.
pub const CREATE_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Config var that selects a custom buildpack.
pub const BUILDPACK_VAR: &str = "BUILDPACK_URL";

// ── list ──────────────────────────────────────────────────────────────────────

/// Apps visible to the current user, split by ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppListing {
    pub user: String,
    pub owned: Vec<String>,
    pub shared: Vec<String>,
}

impl AppListing {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty() && self.shared.is_empty()
    }
}

/// List apps, partitioned into owned and shared.
///
/// # Errors
///
/// Returns an error if the API calls fail.
pub async fn list(api: &impl AppsApi) -> Result<AppListing> {
    let user = api.user().await.context("fetching current user")?;
    let apps = api.list_apps().await.context("listing apps")?;
    let (owned, shared) = partition_apps(&apps, &user);
    Ok(AppListing {
        user,
        owned,
        shared,
    })
}

// ── create ────────────────────────────────────────────────────────────────────

/// Parameters for `apps:create`.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Requested name, already lower-cased and trimmed.
    pub name: Option<String>,
    pub stack: Option<String>,
    pub addons: Vec<String>,
    pub buildpack: Option<String>,
    /// Give up waiting for provisioning after this long.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl CreateRequest {
    /// Normalise a user-supplied app name: trimmed and lower-cased, empty → `None`.
    #[must_use]
    pub fn normalize_name(raw: Option<&str>) -> Option<String> {
        raw.map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty())
    }

    /// Split a comma-delimited add-on list, dropping blanks.
    #[must_use]
    pub fn split_addons(raw: Option<&str>) -> Vec<String> {
        raw.unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Create an app, wait for provisioning, then install add-ons and set the
/// buildpack.
///
/// While the platform reports `creating`, completion is polled every
/// `poll_interval` and a progress mark is emitted per poll.
///
/// # Errors
///
/// Returns `CommandError::TimedOut` if provisioning does not complete within
/// `timeout`, or any API error unmodified.
pub async fn create(
    api: &impl AppsApi,
    reporter: &impl ProgressReporter,
    req: &CreateRequest,
) -> Result<CreatedApp> {
    match &req.name {
        Some(name) => reporter.action(&format!("Creating {name}")),
        None => reporter.action("Creating"),
    }

    let created = api
        .create_app(req.name.as_deref(), req.stack.as_deref())
        .await?;
    let name = created.name.clone();
    tracing::debug!(app = %name, status = ?created.create_status, "create requested");

    if created.is_creating() {
        wait_for_create(api, reporter, &name, req.timeout, req.poll_interval).await?;
    }
    reporter.done(&format!(
        "done, stack is {}",
        created.stack.as_deref().unwrap_or_default()
    ));
    reporter.line("");

    for addon in &req.addons {
        reporter.action(&format!("Adding {addon} to {name}"));
        api.install_addon(&name, addon).await?;
        reporter.done("done");
    }

    if let Some(buildpack) = &req.buildpack {
        let vars = BTreeMap::from([(BUILDPACK_VAR.to_string(), buildpack.clone())]);
        api.add_config_vars(&name, &vars).await?;
    }

    Ok(created)
}

async fn wait_for_create(
    api: &impl AppsApi,
    reporter: &impl ProgressReporter,
    name: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<()> {
    let poll = async {
        loop {
            if api.create_complete(name).await? {
                return Ok::<(), anyhow::Error>(());
            }
            tracing::debug!(app = name, "still creating");
            reporter.tick();
            tokio::time::sleep(interval).await;
        }
    };
    match tokio::time::timeout(timeout, poll).await {
        Ok(result) => result,
        Err(_) => {
            reporter.done("");
            Err(CommandError::TimedOut.into())
        }
    }
}

/// Add `remote` pointing at `git_url` when inside a git repository that does
/// not already have it.
///
/// Returns `true` if the remote was added.
///
/// # Errors
///
/// Returns an error if `git remote add` fails.
pub async fn add_git_remote(
    git: &impl GitRemotes,
    reporter: &impl ProgressReporter,
    remote: &str,
    git_url: &str,
) -> Result<bool> {
    let Some(remotes) = git.remotes().await? else {
        return Ok(false);
    };
    if remotes.contains_key(remote) {
        return Ok(false);
    }
    git.add_remote(remote, git_url).await?;
    reporter.line(&format!("Git remote {remote} added"));
    Ok(true)
}

// ── rename ────────────────────────────────────────────────────────────────────

/// Rename `app` to `new_name` and return the record under its new name.
///
/// # Errors
///
/// Returns a usage error if `new_name` is blank, or any API error.
pub async fn rename(
    api: &impl AppsApi,
    reporter: &impl ProgressReporter,
    app: &str,
    new_name: Option<&str>,
) -> Result<AppInfo> {
    let new_name = new_name.map(|n| n.trim().to_lowercase()).unwrap_or_default();
    if new_name.is_empty() {
        return Err(CommandError::Usage("Must specify a new name.".to_string()).into());
    }

    reporter.action(&format!("Renaming {app} to {new_name}"));
    api.rename_app(app, &new_name).await?;
    reporter.done("done");
    reporter.line("");

    api.app_info(&new_name).await
}

/// Point every remote that referenced `old_app` at the renamed app.
///
/// The URL is the one the API reported, else the conventional URL on
/// `git_host`. Returns the names of the rewritten remotes.
///
/// # Errors
///
/// Returns an error if a git remote cannot be rewritten.
pub async fn update_git_remotes(
    git: &impl GitRemotes,
    reporter: &impl ProgressReporter,
    old_app: &str,
    renamed: &AppInfo,
    git_host: &str,
) -> Result<Vec<String>> {
    let Some(remotes) = git.remotes().await? else {
        reporter.line("Don't forget to update your Git remotes on any local checkouts.");
        return Ok(Vec::new());
    };

    let git_url = renamed
        .git_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| git_url_for(&renamed.name, git_host));

    let mut updated = Vec::new();
    for remote in remotes_for_app(&remotes, old_app) {
        git.remove_remote(remote).await?;
        git.add_remote(remote, &git_url).await?;
        reporter.line(&format!("Git remote {remote} updated"));
        updated.push(remote.to_string());
    }
    Ok(updated)
}

// ── open ──────────────────────────────────────────────────────────────────────

/// Open the app's web URL in the browser and return it.
///
/// # Errors
///
/// Returns an error if the app has no web URL or the browser cannot be launched.
pub async fn open(
    api: &impl AppsApi,
    browser: &impl BrowserLauncher,
    reporter: &impl ProgressReporter,
    app: &str,
) -> Result<String> {
    let info = api.app_info(app).await?;
    let url = info
        .web_url
        .with_context(|| format!("{app} has no web URL"))?;
    reporter.action(&format!("opening {url}"));
    reporter.done("done");
    reporter.line("");
    browser.open(&url).await?;
    Ok(url)
}

// ── destroy ───────────────────────────────────────────────────────────────────

/// Warning shown before destroying an app.
#[must_use]
pub fn destroy_warning(app: &str) -> String {
    format!(
        "WARNING: Potentially Destructive Action\nThis command will destroy {app} (including all add-ons)."
    )
}

/// Destroy `app` after confirmation and remove git remotes pointing at it.
///
/// `confirm` is the value of `--confirm`; without it the user is prompted.
/// Returns `false` if the user declined.
///
/// # Errors
///
/// Returns an error if the app is not accessible, `--confirm` names a
/// different app, or any API or git call fails.
pub async fn destroy(
    api: &impl AppsApi,
    git: &impl GitRemotes,
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    app: &str,
    confirm: Option<&str>,
) -> Result<bool> {
    // fail fast if no access or the app does not exist
    api.app_info(app).await?;

    let confirmed = match confirm {
        Some(c) if c == app => true,
        Some(c) => {
            return Err(CommandError::ConfirmMismatch {
                confirmed: c.to_string(),
                app: app.to_string(),
            }
            .into());
        }
        None => prompter.confirm_destructive(app, &destroy_warning(app))?,
    };
    if !confirmed {
        return Ok(false);
    }

    reporter.action(&format!("destroying {app} (including all add-ons)"));
    api.destroy_app(app).await?;
    if let Some(remotes) = git.remotes().await? {
        for remote in remotes_for_app(&remotes, app) {
            git.remove_remote(remote).await?;
        }
    }
    reporter.done("done");
    reporter.line("");
    Ok(true)
}
