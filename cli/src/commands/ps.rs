//! `hk ps*`: list, restart, scale and stop processes.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::ps as service;
pub use crate::application::services::ps::Counter;
use crate::domain::process::parse_scale_args;
use crate::domain::{CommandError, DisplayValue, Displayable, ProcessTarget};
use crate::output::json;

/// Process or process type argument shared by `ps:restart` and `ps:stop`.
#[derive(Args)]
pub struct TargetArgs {
    /// Process (`web.1`) or process type (`web`)
    #[arg(value_name = "PROCESS")]
    pub process: Option<String>,
}

/// Arguments for `ps:scale`.
#[derive(Args)]
pub struct ScaleArgs {
    /// Changes such as `web=2`, `worker+1` or `web-1`
    #[arg(value_name = "TYPE=QTY")]
    pub changes: Vec<String>,
}

/// Arguments for `ps:dynos` and `ps:workers`.
#[derive(Args)]
pub struct CounterArgs {
    /// New quantity
    #[arg(value_name = "QTY")]
    pub qty: Option<String>,
}

/// Run `hk ps`.
///
/// # Errors
///
/// Returns an error if the app cannot be resolved or its processes fetched.
pub async fn list(ctx: &AppContext) -> Result<()> {
    let app = ctx.app().await?;
    let by_command = service::list(&ctx.api, &app, chrono::Utc::now()).await?;

    if ctx.is_json() {
        return json::render(&by_command);
    }
    ctx.output.info(&format!("{app} processes by command"));
    ctx.output.object(&by_command.into());
    Ok(())
}

/// Run `hk ps:restart [PROCESS]`.
///
/// # Errors
///
/// Returns an error if the restart request fails.
pub async fn restart(ctx: &AppContext, args: &TargetArgs) -> Result<()> {
    let app = ctx.app().await?;
    let target = service::restart(&ctx.api, &ctx.reporter(), &app, args.process.as_deref()).await?;
    if ctx.is_json() {
        json::render(&serde_json::json!({ "app": app, "restarted": target.describe() }))?;
    }
    Ok(())
}

/// Run `hk ps:scale TYPE=QTY...`.
///
/// # Errors
///
/// Returns a usage error when no change parses, or the first API error.
pub async fn scale(ctx: &AppContext, args: &ScaleArgs) -> Result<()> {
    if parse_scale_args(&args.changes).is_empty() {
        return Err(CommandError::Usage("Usage: hk ps:scale web=2 worker+1".to_string()).into());
    }
    let app = ctx.app().await?;
    let results = service::scale(&ctx.api, &ctx.reporter(), &app, &args.changes).await?;

    if ctx.is_json() {
        let map = results
            .into_iter()
            .map(|r| (r.process_type, DisplayValue::Text(r.quantity)))
            .collect::<crate::domain::DisplayMap>();
        json::render(&Displayable::Map(map))?;
    }
    Ok(())
}

/// Run `hk ps:stop PROCESS`.
///
/// # Errors
///
/// Returns a usage error when no process is named, or any API error.
pub async fn stop(ctx: &AppContext, args: &TargetArgs) -> Result<()> {
    if ProcessTarget::from_arg(args.process.as_deref()) == ProcessTarget::All {
        return Err(CommandError::Usage("Usage: hk ps:stop PROCESS".to_string()).into());
    }
    let app = ctx.app().await?;
    let target = service::stop(&ctx.api, &ctx.reporter(), &app, args.process.as_deref()).await?;
    if ctx.is_json() {
        json::render(&serde_json::json!({ "app": app, "stopped": target.describe() }))?;
    }
    Ok(())
}

/// Run the deprecated `hk ps:dynos [QTY]` / `hk ps:workers [QTY]`.
///
/// # Errors
///
/// Returns an error for cedar apps when reading the count, or any API error.
pub async fn counter(ctx: &AppContext, counter: Counter, args: &CounterArgs) -> Result<()> {
    let app = ctx.app().await?;
    let message =
        service::counter(&ctx.api, &ctx.reporter(), &app, counter, args.qty.as_deref()).await?;
    if ctx.is_json() {
        json::render(&serde_json::json!({ "app": app, "message": message }))
    } else {
        ctx.output.line(&message);
        Ok(())
    }
}
