//! `hk apps*`: list, info, create, rename, open and destroy apps.

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::AppsApi as _;
use crate::application::services::apps::{self as service, CREATE_POLL_INTERVAL, CreateRequest};
use crate::domain::app::{info_display, info_raw};
use crate::domain::{CommandError, display::text_map};
use crate::output::HumanRenderer;
use crate::output::human::format_app_listing;
use crate::output::json;

/// Arguments for `apps:info`.
#[derive(Args)]
pub struct InfoArgs {
    /// Output info as raw key/value pairs
    #[arg(short, long)]
    pub raw: bool,
}

/// Arguments for `apps:create`.
#[derive(Args)]
pub struct CreateArgs {
    /// Name for the new app (generated when omitted)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Comma-delimited list of add-ons to install
    #[arg(long, value_name = "ADDONS")]
    pub addons: Option<String>,

    /// Buildpack URL to use for this app
    #[arg(short, long, value_name = "URL")]
    pub buildpack: Option<String>,

    /// Stack on which to create the app
    #[arg(short, long, value_name = "STACK")]
    pub stack: Option<String>,

    /// Seconds to wait for the app to become available
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for `apps:rename`.
#[derive(Args)]
pub struct RenameArgs {
    /// New name for the app
    #[arg(value_name = "NEWNAME")]
    pub new_name: Option<String>,
}

/// Arguments for `apps:destroy`.
#[derive(Args)]
pub struct DestroyArgs {
    /// App to destroy
    #[arg(value_name = "APP")]
    pub name: Option<String>,

    /// Skip the prompt by naming the app again
    #[arg(long, value_name = "APP")]
    pub confirm: Option<String>,
}

/// Run `hk apps`.
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched.
pub async fn list(ctx: &AppContext) -> Result<()> {
    let listing = service::list(&ctx.api).await?;

    if ctx.is_json() {
        return json::render(&serde_json::json!({
            "user": listing.user,
            "owned": listing.owned,
            "shared": listing.shared,
        }));
    }

    HumanRenderer::new(&ctx.output).print_lines(&format_app_listing(
        &listing.user,
        &listing.owned,
        &listing.shared,
    ));
    Ok(())
}

/// Run `hk apps:info`.
///
/// # Errors
///
/// Returns an error if the app cannot be resolved or fetched.
pub async fn info(ctx: &AppContext, args: &InfoArgs) -> Result<()> {
    let app = ctx.app().await?;
    let info = ctx.api.app_info(&app).await?;

    if ctx.is_json() {
        return json::render(&info);
    }
    if args.raw {
        return ctx.renderer(true).render(&info_raw(&info)?.into());
    }

    ctx.output.header(&format!("{} Info", info.name));
    ctx.renderer(false).render(&info_display(&info).into())
}

/// Run `hk apps:create`.
///
/// # Errors
///
/// Returns an error if creation fails or times out.
pub async fn create(ctx: &AppContext, args: &CreateArgs) -> Result<()> {
    let req = CreateRequest {
        name: CreateRequest::normalize_name(args.name.as_deref()),
        stack: args.stack.clone().or_else(|| ctx.config.create.stack.clone()),
        addons: CreateRequest::split_addons(args.addons.as_deref()),
        buildpack: args.buildpack.clone(),
        timeout: Duration::from_secs(args.timeout.unwrap_or(ctx.config.create.timeout_secs)),
        poll_interval: CREATE_POLL_INTERVAL,
    };

    let reporter = ctx.reporter();
    let created = service::create(&ctx.api, &reporter, &req).await?;

    if !ctx.is_json() {
        let urls = text_map([
            ("Git URL", created.git_url.clone()),
            ("Web URL", created.web_url.clone()),
        ]);
        ctx.renderer(false).render(&urls.into())?;
    }

    if let Some(git_url) = &created.git_url {
        service::add_git_remote(&ctx.git, &reporter, ctx.create_remote(), git_url).await?;
    }

    if ctx.is_json() {
        json::render(&created)?;
    }
    Ok(())
}

/// Run `hk apps:rename`.
///
/// # Errors
///
/// Returns a usage error when no new name is given, or any API or git error.
pub async fn rename(ctx: &AppContext, args: &RenameArgs) -> Result<()> {
    if args.new_name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        return Err(CommandError::Usage("Must specify a new name.".to_string()).into());
    }
    let app = ctx.app().await?;

    let reporter = ctx.reporter();
    let info = service::rename(&ctx.api, &reporter, &app, args.new_name.as_deref()).await?;

    if !ctx.is_json() {
        let urls = text_map([
            ("Git URL", info.git_url.clone()),
            ("Web URL", info.web_url.clone()),
        ]);
        ctx.renderer(false).render(&urls.into())?;
    }

    service::update_git_remotes(&ctx.git, &reporter, &app, &info, &ctx.config.git.host).await?;

    if ctx.is_json() {
        json::render(&info)?;
    }
    Ok(())
}

/// Run `hk apps:open`.
///
/// # Errors
///
/// Returns an error if the app has no web URL or the browser cannot start.
pub async fn open(ctx: &AppContext) -> Result<()> {
    let app = ctx.app().await?;
    let url = service::open(&ctx.api, &ctx.browser, &ctx.reporter(), &app).await?;
    if ctx.is_json() {
        json::render(&serde_json::json!({ "app": app, "url": url }))?;
    }
    Ok(())
}

/// Run `hk apps:destroy`.
///
/// The app comes from the positional argument, `--app`, or `--confirm`, in
/// that order. Git remotes are never consulted.
///
/// # Errors
///
/// Returns a usage error when no app is named, a mismatch error when
/// `--confirm` names another app, or any API error.
pub async fn destroy(ctx: &AppContext, args: &DestroyArgs) -> Result<()> {
    let Some(app) = args
        .name
        .as_deref()
        .or(ctx.target.app.as_deref())
        .or(args.confirm.as_deref())
    else {
        return Err(CommandError::Usage("Usage: hk apps:destroy --app APP".to_string()).into());
    };

    let destroyed = service::destroy(
        &ctx.api,
        &ctx.git,
        ctx,
        &ctx.reporter(),
        app,
        args.confirm.as_deref(),
    )
    .await?;

    if ctx.is_json() {
        json::render(&serde_json::json!({ "app": app, "destroyed": destroyed }))?;
    }
    Ok(())
}
