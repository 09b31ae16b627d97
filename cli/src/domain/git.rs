//! Git remote parsing for platform-hosted repositories.
//!
//! Pure functions only; the `git` invocations live in `infra::git`.

use std::collections::BTreeMap;

/// Extract the app name from a platform git URL.
///
/// Accepts `git@HOST:APP.git`, `ssh://git@HOST/APP.git` and
/// `https://HOST/APP.git`.
#[must_use]
pub fn app_from_git_url(url: &str, host: &str) -> Option<String> {
    let path = url
        .strip_prefix(&format!("git@{host}:"))
        .or_else(|| url.strip_prefix(&format!("ssh://git@{host}/")))
        .or_else(|| url.strip_prefix(&format!("https://{host}/")))?;
    let app = path.strip_suffix(".git").unwrap_or(path);
    if app.is_empty() || app.contains('/') {
        return None;
    }
    Some(app.to_string())
}

/// Parse `git remote -v` output into remote name → app name, keeping only
/// remotes that point at `host`.
#[must_use]
pub fn parse_remotes(output: &str, host: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            let url = fields.next()?;
            let app = app_from_git_url(url, host)?;
            Some((name.to_string(), app))
        })
        .collect()
}

/// Remote names in `remotes` that point at `app`.
#[must_use]
pub fn remotes_for_app<'a>(remotes: &'a BTreeMap<String, String>, app: &str) -> Vec<&'a str> {
    remotes
        .iter()
        .filter(|(_, a)| a.as_str() == app)
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Conventional git URL for an app when the API does not supply one.
#[must_use]
pub fn git_url_for(app: &str, host: &str) -> String {
    format!("git@{host}:{app}.git")
}
