//! Process use-cases: list, restart, scale, stop, and the legacy dyno/worker
//! counters.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::application::ports::{AppsApi, ProcessApi, ProgressReporter};
use crate::domain::format::quantify;
use crate::domain::process::{parse_scale_args, processes_by_command};
use crate::domain::{CommandError, DisplayMap, ProcessTarget};

/// Processes of `app` grouped by command, with ages relative to `now`.
///
/// # Errors
///
/// Returns any API error unmodified.
pub async fn list(api: &impl ProcessApi, app: &str, now: DateTime<Utc>) -> Result<DisplayMap> {
    let processes = api.processes(app).await?;
    Ok(processes_by_command(&processes, now))
}

/// Restart every process, one process (`web.1`) or one type (`web`).
///
/// # Errors
///
/// Returns any API error unmodified.
pub async fn restart(
    api: &impl ProcessApi,
    reporter: &impl ProgressReporter,
    app: &str,
    arg: Option<&str>,
) -> Result<ProcessTarget> {
    let target = ProcessTarget::from_arg(arg);
    reporter.partial(&format!("Restarting {}... ", target.describe()));
    api.restart(app, &target).await?;
    reporter.done("done");
    Ok(target)
}

/// Stop one process or one process type.
///
/// # Errors
///
/// Returns a usage error when no process is named, or any API error.
pub async fn stop(
    api: &impl ProcessApi,
    reporter: &impl ProgressReporter,
    app: &str,
    arg: Option<&str>,
) -> Result<ProcessTarget> {
    let target = ProcessTarget::from_arg(arg);
    if target == ProcessTarget::All {
        return Err(CommandError::Usage("Usage: hk ps:stop PROCESS".to_string()).into());
    }
    reporter.partial(&format!("Stopping {}... ", target.describe()));
    api.stop(app, &target).await?;
    reporter.done("done");
    Ok(target)
}

/// Outcome of one scale change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleResult {
    pub process_type: String,
    pub quantity: String,
}

/// Apply `TYPE=N` / `TYPE+N` / `TYPE-N` changes in argument order.
///
/// # Errors
///
/// Returns a usage error when no argument parses, or the first API error.
pub async fn scale<S: AsRef<str>>(
    api: &impl ProcessApi,
    reporter: &impl ProgressReporter,
    app: &str,
    args: &[S],
) -> Result<Vec<ScaleResult>> {
    let changes = parse_scale_args(args);
    if changes.is_empty() {
        return Err(CommandError::Usage("Usage: hk ps:scale web=2 worker+1".to_string()).into());
    }

    let mut results = Vec::with_capacity(changes.len());
    for change in changes {
        reporter.partial(&format!("Scaling {} processes... ", change.process_type));
        let quantity = api
            .scale(app, &change.process_type, &change.amount)
            .await?;
        reporter.done(&format!("done, now running {quantity}"));
        results.push(ScaleResult {
            process_type: change.process_type,
            quantity,
        });
    }
    Ok(results)
}

/// Legacy per-stack process counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Dynos,
    Workers,
}

impl Counter {
    /// Singular noun used in messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Dynos => "dyno",
            Self::Workers => "worker",
        }
    }

    /// Subcommand name, e.g. `ps:dynos`.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            Self::Dynos => "ps:dynos",
            Self::Workers => "ps:workers",
        }
    }

    /// Deprecation notice pointing at `ps:scale`.
    #[must_use]
    pub fn deprecation(self) -> String {
        let plural = format!("{}s", self.noun());
        format!(
            "`hk {} QTY` has been deprecated and replaced with `hk ps:scale {plural}=QTY`",
            self.command()
        )
    }
}

/// Show or set a legacy counter; returns the message to display.
///
/// # Errors
///
/// Returns an error for cedar apps when reading the count, or any API error.
pub async fn counter<A: AppsApi + ProcessApi>(
    api: &A,
    reporter: &impl ProgressReporter,
    app: &str,
    counter: Counter,
    qty: Option<&str>,
) -> Result<String> {
    reporter.warn(&counter.deprecation());

    if let Some(qty) = qty {
        let current = match counter {
            Counter::Dynos => api.set_dynos(app, qty).await?,
            Counter::Workers => api.set_workers(app, qty).await?,
        };
        return Ok(format!("{app} now running {}", quantify(counter.noun(), current)));
    }

    let info = api.app_info(app).await?;
    if info.is_cedar() {
        return Err(CommandError::Unsupported("For Cedar apps, use `hk ps`".to_string()).into());
    }
    let current = match counter {
        Counter::Dynos => info.dynos,
        Counter::Workers => info.workers,
    }
    .unwrap_or(0);
    Ok(format!("{app} is running {}", quantify(counter.noun(), current)))
}
