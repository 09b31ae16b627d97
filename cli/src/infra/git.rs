//! Infrastructure implementation of the `GitRemotes` port using the `git` CLI.

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, GitRemotes};
use crate::domain::git::parse_remotes;

/// `GitRemotes` backed by `git` in the current working directory.
pub struct GitCli<R: CommandRunner> {
    runner: R,
    host: String,
}

impl<R: CommandRunner> GitCli<R> {
    /// `host` is the platform git host used to recognise app remotes.
    #[must_use]
    pub fn new(runner: R, host: impl Into<String>) -> Self {
        Self {
            runner,
            host: host.into(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = self.runner.run("git", args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn in_work_tree(&self) -> bool {
        match self
            .runner
            .run("git", &["rev-parse", "--is-inside-work-tree"])
            .await
        {
            Ok(o) => o.status.success() && String::from_utf8_lossy(&o.stdout).trim() == "true",
            Err(e) => {
                tracing::debug!(error = %e, "git unavailable");
                false
            }
        }
    }
}

impl<R: CommandRunner> GitRemotes for GitCli<R> {
    async fn remotes(&self) -> Result<Option<BTreeMap<String, String>>> {
        if !self.in_work_tree().await {
            return Ok(None);
        }
        let out = self
            .git(&["remote", "-v"])
            .await
            .context("listing git remotes")?;
        Ok(Some(parse_remotes(&out, &self.host)))
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "add", name, url]).await.map(drop)
    }

    async fn remove_remote(&self, name: &str) -> Result<()> {
        self.git(&["remote", "rm", name]).await.map(drop)
    }
}
