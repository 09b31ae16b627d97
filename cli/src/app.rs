//! Application context: the state passed to every command handler.
//!
//! `AppContext` bundles the output context, loaded configuration and the
//! production port adapters so command signatures stay uniform.

use anyhow::Result;

use crate::application::ports::{ConfigStore, Prompter};
use crate::application::services::resolve::{AppSelector, resolve_app};
use crate::domain::{CommandError, HkConfig};
use crate::infra::{GitCli, HttpPlatformClient, SystemBrowser, TokioCommandRunner, YamlConfigStore};
use crate::output::{HumanRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// App selection flags.
#[derive(Default)]
pub struct TargetFlags {
    /// `--app APP`.
    pub app: Option<String>,
    /// `--remote NAME`.
    pub remote: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Which app to act on.
    pub target: TargetFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Loaded configuration with environment overrides applied.
    pub config: HkConfig,
    /// Platform API client.
    pub api: HttpPlatformClient,
    /// Git remote adapter for the working directory.
    pub git: GitCli<TokioCommandRunner>,
    /// Default browser launcher.
    pub browser: SystemBrowser<TokioCommandRunner>,
    /// App selection flags.
    pub target: TargetFlags,
    /// `HEROKU_APP` from the environment.
    pub env_app: Option<String>,
    /// When `true`, never prompt.
    ///
    /// Set when the `CI` environment variable is present or stderr is not a
    /// terminal.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let store = YamlConfigStore;
        let config = store.load()?;
        let config_path = store.path()?;

        let non_interactive =
            std::env::var("CI").is_ok() || !console::Term::stderr().is_term();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            api: HttpPlatformClient::new(&config.api, &config_path)?,
            git: GitCli::new(TokioCommandRunner::default(), config.git.host.clone()),
            browser: SystemBrowser::new(TokioCommandRunner::default()),
            config,
            target: flags.target,
            env_app: std::env::var("HEROKU_APP").ok(),
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Progress reporter for services; silent in JSON mode.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output, self.is_json())
    }

    /// Returns the renderer for the current mode; `raw` selects `key=value`
    /// output in human mode.
    #[must_use]
    pub fn renderer(&self, raw: bool) -> Renderer<'_> {
        match (self.mode, raw) {
            (OutputMode::Json, _) => Renderer::Json,
            (OutputMode::Human, true) => Renderer::Raw,
            (OutputMode::Human, false) => Renderer::Human(HumanRenderer::new(&self.output)),
        }
    }

    /// Remote name used for new apps: `--remote`, else the configured default.
    #[must_use]
    pub fn create_remote(&self) -> &str {
        self.target
            .remote
            .as_deref()
            .unwrap_or(&self.config.create.remote)
    }

    /// Resolve the app this command acts on.
    ///
    /// # Errors
    ///
    /// Returns a usage error if no app can be determined.
    pub async fn app(&self) -> Result<String> {
        let selector = AppSelector {
            app: self.target.app.as_deref(),
            remote: self.target.remote.as_deref(),
            env_app: self.env_app.as_deref(),
            default_remote: &self.config.create.remote,
        };
        let app = resolve_app(&self.git, &selector).await?;
        tracing::debug!(app, "resolved app");
        Ok(app)
    }
}

impl Prompter for AppContext {
    fn confirm_destructive(&self, expected: &str, warning: &str) -> Result<bool> {
        if self.non_interactive {
            return Err(CommandError::Usage(format!(
                "{warning}\nConfirmation required. Re-run this command with --confirm {expected}"
            ))
            .into());
        }
        eprintln!();
        for line in warning.lines() {
            eprintln!(" !    {line}");
        }
        eprintln!();
        let typed: String = dialoguer::Input::new()
            .with_prompt(format!(
                "> To proceed, type \"{expected}\" or re-run this command with --confirm {expected}"
            ))
            .allow_empty(true)
            .interact_text()?;
        Ok(typed.trim() == expected)
    }
}
