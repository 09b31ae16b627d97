//! Shared mock infrastructure for unit tests.
//!
//! Hand-written implementations of the application ports. Each mock records
//! the calls it receives so tests can assert on ordering and arguments.

#![allow(clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use anyhow::Result;
use hk_cli::application::ports::{
    AppsApi, BrowserLauncher, GitRemotes, ProcessApi, ProgressReporter, Prompter,
};
use hk_cli::domain::app::{Addon, Collaborator};
use hk_cli::domain::git::app_from_git_url;
use hk_cli::domain::{ApiError, AppInfo, AppSummary, CreatedApp, Process, ProcessTarget};

pub const GIT_HOST: &str = "heroku.com";

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub fn summary(name: &str, owner: &str) -> AppSummary {
    AppSummary {
        name: name.to_string(),
        owner: owner.to_string(),
    }
}

pub fn app_info(name: &str) -> AppInfo {
    AppInfo {
        name: name.to_string(),
        owner: Some("me@example.com".to_string()),
        stack: Some("cedar".to_string()),
        create_status: Some("complete".to_string()),
        git_url: Some(format!("git@{GIT_HOST}:{name}.git")),
        web_url: Some(format!("http://{name}.herokuapp.com/")),
        dynos: Some(0),
        workers: Some(0),
        addons: vec![Addon {
            name: "heroku-postgresql:dev".to_string(),
            description: "Heroku Postgres Dev".to_string(),
        }],
        collaborators: vec![Collaborator {
            email: "me@example.com".to_string(),
        }],
        ..AppInfo::default()
    }
}

pub fn created(name: &str, status: &str) -> CreatedApp {
    CreatedApp {
        name: name.to_string(),
        create_status: Some(status.to_string()),
        stack: Some("cedar".to_string()),
        git_url: Some(format!("git@{GIT_HOST}:{name}.git")),
        web_url: Some(format!("http://{name}.herokuapp.com/")),
    }
}

pub fn process(name: &str, command: &str, state: &str, elapsed: u64) -> Process {
    Process {
        process: name.to_string(),
        command: command.to_string(),
        state: state.to_string(),
        elapsed,
    }
}

// ── Mock: platform API ────────────────────────────────────────────────────────

/// Scripted platform. `info: None` makes `app_info` fail with not found.
pub struct MockPlatform {
    pub calls: RefCell<Vec<String>>,
    pub user: String,
    pub apps: Vec<AppSummary>,
    pub info: Option<AppInfo>,
    pub created: CreatedApp,
    /// `create_complete` answers `false` this many times, then `true`.
    pub pending_polls: Cell<u32>,
    pub processes: Vec<Process>,
    pub scale_result: String,
    pub count: u64,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            user: "me@example.com".to_string(),
            apps: Vec::new(),
            info: Some(app_info("myapp")),
            created: created("myapp", "complete"),
            pending_polls: Cell::new(0),
            processes: Vec::new(),
            scale_result: "2".to_string(),
            count: 0,
        }
    }
}

impl MockPlatform {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }
}

fn target_text(target: &ProcessTarget) -> String {
    match target.param() {
        Some((key, value)) => format!("{key}={value}"),
        None => "all".to_string(),
    }
}

impl AppsApi for MockPlatform {
    async fn user(&self) -> Result<String> {
        self.record("user".to_string());
        Ok(self.user.clone())
    }

    async fn list_apps(&self) -> Result<Vec<AppSummary>> {
        self.record("list_apps".to_string());
        Ok(self.apps.clone())
    }

    async fn app_info(&self, app: &str) -> Result<AppInfo> {
        self.record(format!("app_info {app}"));
        let mut info = self
            .info
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("/apps/{app}")))?;
        info.name = app.to_string();
        info.git_url = Some(format!("git@{GIT_HOST}:{app}.git"));
        Ok(info)
    }

    async fn create_app(&self, name: Option<&str>, stack: Option<&str>) -> Result<CreatedApp> {
        self.record(format!(
            "create_app {} {}",
            name.unwrap_or("-"),
            stack.unwrap_or("-")
        ));
        Ok(self.created.clone())
    }

    async fn create_complete(&self, app: &str) -> Result<bool> {
        self.record(format!("create_complete {app}"));
        let pending = self.pending_polls.get();
        if pending == 0 {
            return Ok(true);
        }
        if pending != u32::MAX {
            self.pending_polls.set(pending - 1);
        }
        Ok(false)
    }

    async fn rename_app(&self, app: &str, new_name: &str) -> Result<()> {
        self.record(format!("rename_app {app} {new_name}"));
        Ok(())
    }

    async fn destroy_app(&self, app: &str) -> Result<()> {
        self.record(format!("destroy_app {app}"));
        Ok(())
    }

    async fn install_addon(&self, app: &str, addon: &str) -> Result<()> {
        self.record(format!("install_addon {app} {addon}"));
        Ok(())
    }

    async fn add_config_vars(&self, app: &str, vars: &BTreeMap<String, String>) -> Result<()> {
        let pairs: Vec<String> = vars.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.record(format!("add_config_vars {app} {}", pairs.join(",")));
        Ok(())
    }
}

impl ProcessApi for MockPlatform {
    async fn processes(&self, app: &str) -> Result<Vec<Process>> {
        self.record(format!("processes {app}"));
        Ok(self.processes.clone())
    }

    async fn restart(&self, app: &str, target: &ProcessTarget) -> Result<()> {
        self.record(format!("restart {app} {}", target_text(target)));
        Ok(())
    }

    async fn scale(&self, app: &str, process_type: &str, qty: &str) -> Result<String> {
        self.record(format!("scale {app} {process_type} {qty}"));
        Ok(self.scale_result.clone())
    }

    async fn stop(&self, app: &str, target: &ProcessTarget) -> Result<()> {
        self.record(format!("stop {app} {}", target_text(target)));
        Ok(())
    }

    async fn set_dynos(&self, app: &str, qty: &str) -> Result<u64> {
        self.record(format!("set_dynos {app} {qty}"));
        Ok(self.count)
    }

    async fn set_workers(&self, app: &str, qty: &str) -> Result<u64> {
        self.record(format!("set_workers {app} {qty}"));
        Ok(self.count)
    }
}

// ── Mock: git ─────────────────────────────────────────────────────────────────

/// Git working directory. `remotes: None` means "not a repository".
pub struct MockGit {
    pub remotes: RefCell<Option<BTreeMap<String, String>>>,
    pub calls: RefCell<Vec<String>>,
    pub fail: bool,
}

impl MockGit {
    pub fn outside_repo() -> Self {
        Self {
            remotes: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn with_remotes(remotes: &[(&str, &str)]) -> Self {
        let map = remotes
            .iter()
            .map(|(name, app)| ((*name).to_string(), (*app).to_string()))
            .collect();
        Self {
            remotes: RefCell::new(Some(map)),
            calls: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::outside_repo()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GitRemotes for MockGit {
    async fn remotes(&self) -> Result<Option<BTreeMap<String, String>>> {
        if self.fail {
            anyhow::bail!("git: command not found");
        }
        Ok(self.remotes.borrow().clone())
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("add {name} {url}"));
        if let Some(remotes) = self.remotes.borrow_mut().as_mut() {
            let app = app_from_git_url(url, GIT_HOST).unwrap_or_else(|| url.to_string());
            remotes.insert(name.to_string(), app);
        }
        Ok(())
    }

    async fn remove_remote(&self, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("rm {name}"));
        if let Some(remotes) = self.remotes.borrow_mut().as_mut() {
            remotes.remove(name);
        }
        Ok(())
    }
}

// ── Mock: browser ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockBrowser {
    pub opened: RefCell<Vec<String>>,
}

impl BrowserLauncher for MockBrowser {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

// ── Mock: prompter ────────────────────────────────────────────────────────────

/// Answers every confirmation with `answer`; `None` simulates a missing terminal.
pub struct MockPrompter {
    pub answer: Option<bool>,
    pub asked: RefCell<Vec<String>>,
}

impl MockPrompter {
    pub fn answering(answer: Option<bool>) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for MockPrompter {
    fn confirm_destructive(&self, expected: &str, warning: &str) -> Result<bool> {
        self.asked.borrow_mut().push(format!("{expected}|{warning}"));
        self.answer
            .ok_or_else(|| anyhow::anyhow!("confirmation required: {expected}"))
    }
}

// ── Mock: reporter ────────────────────────────────────────────────────────────

/// Records every progress event as `kind:message`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn ticks(&self) -> usize {
        self.events.borrow().iter().filter(|e| *e == "tick").count()
    }
}

impl ProgressReporter for RecordingReporter {
    fn action(&self, message: &str) {
        self.events.borrow_mut().push(format!("action:{message}"));
    }
    fn partial(&self, message: &str) {
        self.events.borrow_mut().push(format!("partial:{message}"));
    }
    fn tick(&self) {
        self.events.borrow_mut().push("tick".to_string());
    }
    fn done(&self, message: &str) {
        self.events.borrow_mut().push(format!("done:{message}"));
    }
    fn line(&self, message: &str) {
        self.events.borrow_mut().push(format!("line:{message}"));
    }
    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn:{message}"));
    }
}
