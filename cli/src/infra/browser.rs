//! Infrastructure implementation of the `BrowserLauncher` port.

use anyhow::{Context, Result};

use crate::application::ports::{BrowserLauncher, CommandRunner};

/// Opens URLs with `$BROWSER` or the platform's default opener.
pub struct SystemBrowser<R: CommandRunner> {
    runner: R,
    browser_env: Option<String>,
}

impl<R: CommandRunner> SystemBrowser<R> {
    /// Launcher honouring `$BROWSER` from the environment.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self::with_browser(runner, std::env::var("BROWSER").ok())
    }

    /// Launcher with an explicit browser override; blank means none.
    #[must_use]
    pub fn with_browser(runner: R, browser: Option<String>) -> Self {
        Self {
            runner,
            browser_env: browser.filter(|b| !b.trim().is_empty()),
        }
    }
}

/// Program and arguments that open `url` on `os` (a `std::env::consts::OS` value).
#[must_use]
pub fn opener_command(url: &str, browser_env: Option<&str>, os: &str) -> (String, Vec<String>) {
    if let Some(browser) = browser_env {
        return (browser.to_string(), vec![url.to_string()]);
    }
    match os {
        "macos" => ("open".to_string(), vec![url.to_string()]),
        "windows" => (
            "cmd".to_string(),
            vec!["/c".into(), "start".into(), String::new(), url.to_string()],
        ),
        _ => ("xdg-open".to_string(), vec![url.to_string()]),
    }
}

impl<R: CommandRunner> BrowserLauncher for SystemBrowser<R> {
    /// Launches the opener detached; a browser left in the foreground keeps
    /// running after `hk` exits.
    async fn open(&self, url: &str) -> Result<()> {
        let (program, args) =
            opener_command(url, self.browser_env.as_deref(), std::env::consts::OS);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .spawn(&program, &args)
            .await
            .with_context(|| format!("cannot open browser with {program}"))
    }
}
