//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags, TargetFlags};
use crate::commands;

/// Manage apps and processes on the hosted platform
#[derive(Parser)]
#[command(
    name = "hk",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// App to act on
    #[arg(short, long, global = true, value_name = "APP")]
    pub app: Option<String>,

    /// Git remote used to find the app, and the remote added by apps:create
    #[arg(long, global = true, value_name = "NAME")]
    pub remote: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List your apps
    #[command(name = "apps", visible_alias = "list")]
    Apps,

    /// Show detailed app information
    #[command(name = "apps:info", visible_alias = "info")]
    AppsInfo(commands::apps::InfoArgs),

    /// Create a new app
    #[command(name = "apps:create", visible_alias = "create")]
    AppsCreate(commands::apps::CreateArgs),

    /// Rename the app
    #[command(name = "apps:rename", visible_alias = "rename")]
    AppsRename(commands::apps::RenameArgs),

    /// Open the app in a web browser
    #[command(name = "apps:open", visible_alias = "open")]
    AppsOpen,

    /// Permanently destroy an app
    #[command(name = "apps:destroy", visible_aliases = ["destroy", "apps:delete"])]
    AppsDestroy(commands::apps::DestroyArgs),

    /// List processes for the app
    #[command(name = "ps")]
    Ps,

    /// Restart app processes
    #[command(name = "ps:restart", visible_alias = "restart")]
    PsRestart(commands::ps::TargetArgs),

    /// Scale processes by type
    #[command(name = "ps:scale", visible_alias = "scale")]
    PsScale(commands::ps::ScaleArgs),

    /// Stop a process or a process type
    #[command(name = "ps:stop", visible_alias = "stop")]
    PsStop(commands::ps::TargetArgs),

    /// Show or set the dyno count (deprecated)
    #[command(name = "ps:dynos", visible_alias = "dynos")]
    PsDynos(commands::ps::CounterArgs),

    /// Show or set the worker count (deprecated)
    #[command(name = "ps:workers", visible_alias = "workers")]
    PsWorkers(commands::ps::CounterArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            app,
            remote,
            verbose: _,
            command,
        } = self;

        if let Command::Version = command {
            return commands::version::run(json);
        }

        let ctx = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            target: TargetFlags { app, remote },
        })?;

        match command {
            Command::Apps => commands::apps::list(&ctx).await,
            Command::AppsInfo(args) => commands::apps::info(&ctx, &args).await,
            Command::AppsCreate(args) => commands::apps::create(&ctx, &args).await,
            Command::AppsRename(args) => commands::apps::rename(&ctx, &args).await,
            Command::AppsOpen => commands::apps::open(&ctx).await,
            Command::AppsDestroy(args) => commands::apps::destroy(&ctx, &args).await,
            Command::Ps => commands::ps::list(&ctx).await,
            Command::PsRestart(args) => commands::ps::restart(&ctx, &args).await,
            Command::PsScale(args) => commands::ps::scale(&ctx, &args).await,
            Command::PsStop(args) => commands::ps::stop(&ctx, &args).await,
            Command::PsDynos(args) => {
                commands::ps::counter(&ctx, commands::ps::Counter::Dynos, &args).await
            }
            Command::PsWorkers(args) => {
                commands::ps::counter(&ctx, commands::ps::Counter::Workers, &args).await
            }
            Command::Version => commands::version::run(json),
        }
    }
}
