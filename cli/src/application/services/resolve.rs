//! Resolve which app a command acts on.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::application::ports::GitRemotes;
use crate::domain::CommandError;

/// Inputs that can name an app, in decreasing precedence.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppSelector<'a> {
    /// `--app APP`.
    pub app: Option<&'a str>,
    /// `--remote NAME`, looked up in the working directory's git remotes.
    pub remote: Option<&'a str>,
    /// `HEROKU_APP` from the environment.
    pub env_app: Option<&'a str>,
    /// Remote preferred when several platform remotes exist.
    pub default_remote: &'a str,
}

/// Resolve the target app.
///
/// Precedence: `--app`, then `--remote`, then `HEROKU_APP`, then the git
/// remotes of the working directory (a single platform remote, or the
/// default remote when there are several).
///
/// # Errors
///
/// Returns `CommandError::NoApp` when nothing names an app, or a usage error
/// when several remotes point at different apps and none is the default.
pub async fn resolve_app(git: &impl GitRemotes, selector: &AppSelector<'_>) -> Result<String> {
    if let Some(app) = selector.app.filter(|a| !a.is_empty()) {
        return Ok(app.to_string());
    }

    let remotes = match git.remotes().await {
        Ok(remotes) => remotes.unwrap_or_default(),
        Err(e) => {
            tracing::debug!(error = %e, "cannot read git remotes; ignoring");
            Default::default()
        }
    };

    if let Some(remote) = selector.remote {
        if let Some(app) = remotes.get(remote) {
            return Ok(app.clone());
        }
        tracing::debug!(remote, "remote does not point at a platform app");
    }

    if let Some(app) = selector.env_app.filter(|a| !a.is_empty()) {
        return Ok(app.to_string());
    }

    let apps: BTreeSet<&String> = remotes.values().collect();
    match apps.len() {
        0 => Err(CommandError::NoApp.into()),
        1 => Ok(apps.into_iter().next().cloned().unwrap_or_default()),
        _ => remotes
            .get(selector.default_remote)
            .cloned()
            .ok_or_else(|| {
                CommandError::Usage(
                    "Multiple apps in git remotes and no app specified.\nSpecify which app to use with --app APP."
                        .to_string(),
                )
                .into()
            }),
    }
}
