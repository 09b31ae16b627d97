//! Unit tests for the apps use-cases using hand-written port mocks.

#![allow(clippy::expect_used)]

use std::time::Duration;

use hk_cli::application::services::apps::{self, BUILDPACK_VAR, CreateRequest};
use hk_cli::domain::{CommandError, error::error_code};

use crate::mocks::{
    GIT_HOST, MockBrowser, MockGit, MockPlatform, MockPrompter, RecordingReporter, app_info,
    created, summary,
};

fn request(name: Option<&str>) -> CreateRequest {
    CreateRequest {
        name: CreateRequest::normalize_name(name),
        stack: None,
        addons: Vec::new(),
        buildpack: None,
        timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(1),
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_partitions_owned_and_shared() {
    let api = MockPlatform {
        apps: vec![
            summary("zeta", "me@example.com"),
            summary("shared-one", "other@example.com"),
            summary("alpha", "me@example.com"),
        ],
        ..MockPlatform::default()
    };

    let listing = apps::list(&api).await.expect("list");

    assert_eq!(listing.user, "me@example.com");
    assert_eq!(listing.owned, vec!["zeta", "alpha"]);
    assert_eq!(listing.shared, vec!["shared-one"]);
    assert!(!listing.is_empty());
}

#[tokio::test]
async fn list_without_apps_is_empty() {
    let api = MockPlatform::default();
    let listing = apps::list(&api).await.expect("list");
    assert!(listing.is_empty());
}

// ── create ────────────────────────────────────────────────────────────────────

#[test]
fn create_request_normalizes_name_and_addons() {
    assert_eq!(
        CreateRequest::normalize_name(Some("  MyApp ")),
        Some("myapp".to_string())
    );
    assert_eq!(CreateRequest::normalize_name(Some("   ")), None);
    assert_eq!(
        CreateRequest::split_addons(Some("redis, ,pg:dev")),
        vec!["redis", "pg:dev"]
    );
    assert!(CreateRequest::split_addons(None).is_empty());
}

#[tokio::test]
async fn create_complete_app_skips_polling() {
    let api = MockPlatform::default();
    let reporter = RecordingReporter::default();

    let app = apps::create(&api, &reporter, &request(Some("MyApp")))
        .await
        .expect("create");

    assert_eq!(app.name, "myapp");
    assert!(!api.called("create_complete"));
    assert_eq!(api.calls(), vec!["create_app myapp -"]);
    assert_eq!(
        reporter.events(),
        vec!["action:Creating myapp", "done:done, stack is cedar", "line:"]
    );
}

#[tokio::test]
async fn create_reports_stack_as_returned() {
    let mut app = created("myapp", "complete");
    app.stack = None;
    let api = MockPlatform {
        created: app,
        ..MockPlatform::default()
    };
    let reporter = RecordingReporter::default();

    apps::create(&api, &reporter, &request(Some("myapp")))
        .await
        .expect("create");

    assert_eq!(reporter.events()[1], "done:done, stack is ");
}

#[tokio::test]
async fn create_without_name_reports_plain_creating() {
    let api = MockPlatform::default();
    let reporter = RecordingReporter::default();

    apps::create(&api, &reporter, &request(None))
        .await
        .expect("create");

    assert_eq!(api.calls()[0], "create_app - -");
    assert_eq!(reporter.events()[0], "action:Creating");
}

#[tokio::test]
async fn create_polls_until_complete_with_a_mark_per_poll() {
    let api = MockPlatform {
        created: created("myapp", "creating"),
        ..MockPlatform::default()
    };
    api.pending_polls.set(3);
    let reporter = RecordingReporter::default();

    apps::create(&api, &reporter, &request(Some("myapp")))
        .await
        .expect("create");

    let polls = api
        .calls()
        .iter()
        .filter(|c| c.starts_with("create_complete"))
        .count();
    assert_eq!(polls, 4);
    assert_eq!(reporter.ticks(), 3);
    assert!(reporter.events().contains(&"done:done, stack is cedar".to_string()));
}

#[tokio::test]
async fn create_times_out_when_never_complete() {
    let api = MockPlatform {
        created: created("myapp", "creating"),
        ..MockPlatform::default()
    };
    api.pending_polls.set(u32::MAX);
    let reporter = RecordingReporter::default();
    let mut req = request(Some("myapp"));
    req.timeout = Duration::from_millis(30);
    req.poll_interval = Duration::from_millis(5);

    let err = apps::create(&api, &reporter, &req)
        .await
        .expect_err("should time out");

    assert_eq!(
        err.downcast_ref::<CommandError>(),
        Some(&CommandError::TimedOut)
    );
    assert_eq!(error_code(&err), "timeout");
    assert_eq!(
        err.to_string(),
        "Timed Out! Check heroku status for known issues."
    );
    assert!(reporter.ticks() >= 1);
    assert!(!api.called("install_addon"));
}

#[tokio::test]
async fn create_installs_addons_then_sets_buildpack() {
    let api = MockPlatform::default();
    let reporter = RecordingReporter::default();
    let mut req = request(Some("myapp"));
    req.stack = Some("cedar".to_string());
    req.addons = vec!["redistogo".to_string(), "pg:dev".to_string()];
    req.buildpack = Some("https://github.com/example/buildpack.git".to_string());

    apps::create(&api, &reporter, &req).await.expect("create");

    assert_eq!(
        api.calls(),
        vec![
            "create_app myapp cedar".to_string(),
            "install_addon myapp redistogo".to_string(),
            "install_addon myapp pg:dev".to_string(),
            format!("add_config_vars myapp {BUILDPACK_VAR}=https://github.com/example/buildpack.git"),
        ]
    );
    let events = reporter.events();
    assert!(events.contains(&"action:Adding redistogo to myapp".to_string()));
    assert!(events.contains(&"action:Adding pg:dev to myapp".to_string()));
}

#[tokio::test]
async fn add_git_remote_inside_repo_without_remote() {
    let git = MockGit::with_remotes(&[]);
    let reporter = RecordingReporter::default();

    let added = apps::add_git_remote(&git, &reporter, "heroku", "git@heroku.com:myapp.git")
        .await
        .expect("add");

    assert!(added);
    assert_eq!(git.calls(), vec!["add heroku git@heroku.com:myapp.git"]);
    assert_eq!(reporter.events(), vec!["line:Git remote heroku added"]);
}

#[tokio::test]
async fn add_git_remote_keeps_existing_remote() {
    let git = MockGit::with_remotes(&[("heroku", "otherapp")]);
    let reporter = RecordingReporter::default();

    let added = apps::add_git_remote(&git, &reporter, "heroku", "git@heroku.com:myapp.git")
        .await
        .expect("add");

    assert!(!added);
    assert!(git.calls().is_empty());
}

#[tokio::test]
async fn add_git_remote_outside_repo_is_noop() {
    let git = MockGit::outside_repo();
    let reporter = RecordingReporter::default();

    let added = apps::add_git_remote(&git, &reporter, "heroku", "git@heroku.com:myapp.git")
        .await
        .expect("add");

    assert!(!added);
    assert!(reporter.events().is_empty());
}

// ── rename ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn rename_requires_new_name() {
    let api = MockPlatform::default();
    let reporter = RecordingReporter::default();

    for name in [None, Some(""), Some("   ")] {
        let err = apps::rename(&api, &reporter, "myapp", name)
            .await
            .expect_err("blank name");
        assert_eq!(err.to_string(), "Must specify a new name.");
        assert_eq!(error_code(&err), "usage");
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn rename_updates_then_refetches_under_new_name() {
    let api = MockPlatform::default();
    let reporter = RecordingReporter::default();

    let info = apps::rename(&api, &reporter, "myapp", Some("NewName"))
        .await
        .expect("rename");

    assert_eq!(info.name, "newname");
    assert_eq!(
        api.calls(),
        vec!["rename_app myapp newname", "app_info newname"]
    );
    assert_eq!(
        reporter.events(),
        vec!["action:Renaming myapp to newname", "done:done", "line:"]
    );
}

#[tokio::test]
async fn update_git_remotes_rewrites_matching_remotes_only() {
    let git = MockGit::with_remotes(&[
        ("heroku", "myapp"),
        ("staging", "myapp"),
        ("prod", "otherapp"),
    ]);
    let reporter = RecordingReporter::default();

    let renamed = app_info("newname");
    let updated = apps::update_git_remotes(&git, &reporter, "myapp", &renamed, GIT_HOST)
        .await
        .expect("update");

    assert_eq!(updated, vec!["heroku", "staging"]);
    assert_eq!(
        git.calls(),
        vec![
            "rm heroku",
            "add heroku git@heroku.com:newname.git",
            "rm staging",
            "add staging git@heroku.com:newname.git",
        ]
    );
    assert_eq!(
        reporter.events(),
        vec!["line:Git remote heroku updated", "line:Git remote staging updated"]
    );
}

#[tokio::test]
async fn update_git_remotes_without_api_url_uses_conventional_url() {
    let git = MockGit::with_remotes(&[("heroku", "myapp")]);
    let reporter = RecordingReporter::default();
    let mut renamed = app_info("newname");
    renamed.git_url = None;

    apps::update_git_remotes(&git, &reporter, "myapp", &renamed, GIT_HOST)
        .await
        .expect("update");

    assert_eq!(
        git.calls(),
        vec!["rm heroku", "add heroku git@heroku.com:newname.git"]
    );
}

#[tokio::test]
async fn update_git_remotes_blank_api_url_never_adds_empty_remote() {
    let git = MockGit::with_remotes(&[("heroku", "myapp")]);
    let reporter = RecordingReporter::default();
    let mut renamed = app_info("newname");
    renamed.git_url = Some(String::new());

    apps::update_git_remotes(&git, &reporter, "myapp", &renamed, GIT_HOST)
        .await
        .expect("update");

    assert!(!git.calls().iter().any(|c| c.trim_end() == "add heroku"));
    assert_eq!(git.calls()[1], "add heroku git@heroku.com:newname.git");
}

#[tokio::test]
async fn update_git_remotes_outside_repo_reminds_user() {
    let git = MockGit::outside_repo();
    let reporter = RecordingReporter::default();

    let updated = apps::update_git_remotes(&git, &reporter, "myapp", &app_info("new"), GIT_HOST)
        .await
        .expect("update");

    assert!(updated.is_empty());
    assert_eq!(
        reporter.events(),
        vec!["line:Don't forget to update your Git remotes on any local checkouts."]
    );
}

// ── open ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_launches_web_url() {
    let api = MockPlatform::default();
    let browser = MockBrowser::default();
    let reporter = RecordingReporter::default();

    let url = apps::open(&api, &browser, &reporter, "myapp")
        .await
        .expect("open");

    assert_eq!(url, "http://myapp.herokuapp.com/");
    assert_eq!(*browser.opened.borrow(), vec![url.clone()]);
    assert_eq!(reporter.events()[0], format!("action:opening {url}"));
}

#[tokio::test]
async fn open_without_web_url_fails() {
    let mut info = crate::mocks::app_info("myapp");
    info.web_url = None;
    let api = MockPlatform {
        info: Some(info),
        ..MockPlatform::default()
    };
    let browser = MockBrowser::default();

    let err = apps::open(&api, &browser, &RecordingReporter::default(), "myapp")
        .await
        .expect_err("no url");

    assert!(err.to_string().contains("has no web URL"));
    assert!(browser.opened.borrow().is_empty());
}

// ── destroy ───────────────────────────────────────────────────────────────────

#[test]
fn destroy_warning_names_app() {
    assert_eq!(
        apps::destroy_warning("myapp"),
        "WARNING: Potentially Destructive Action\nThis command will destroy myapp (including all add-ons)."
    );
}

#[tokio::test]
async fn destroy_with_matching_confirm_removes_app_and_remotes() {
    let api = MockPlatform::default();
    let git = MockGit::with_remotes(&[("heroku", "myapp"), ("other", "otherapp")]);
    let prompter = MockPrompter::answering(None);
    let reporter = RecordingReporter::default();

    let destroyed = apps::destroy(&api, &git, &prompter, &reporter, "myapp", Some("myapp"))
        .await
        .expect("destroy");

    assert!(destroyed);
    assert_eq!(api.calls(), vec!["app_info myapp", "destroy_app myapp"]);
    assert_eq!(git.calls(), vec!["rm heroku"]);
    assert!(prompter.asked.borrow().is_empty());
    assert_eq!(
        reporter.events(),
        vec![
            "action:destroying myapp (including all add-ons)",
            "done:done",
            "line:"
        ]
    );
}

#[tokio::test]
async fn destroy_with_mismatched_confirm_fails_before_destroying() {
    let api = MockPlatform::default();
    let git = MockGit::outside_repo();
    let prompter = MockPrompter::answering(Some(true));

    let err = apps::destroy(
        &api,
        &git,
        &prompter,
        &RecordingReporter::default(),
        "myapp",
        Some("otherapp"),
    )
    .await
    .expect_err("mismatch");

    assert_eq!(
        err.to_string(),
        "Confirmed app otherapp did not match the selected app myapp."
    );
    assert_eq!(error_code(&err), "confirm_mismatch");
    assert!(!api.called("destroy_app"));
}

#[tokio::test]
async fn destroy_prompts_without_confirm_flag() {
    let api = MockPlatform::default();
    let git = MockGit::outside_repo();
    let prompter = MockPrompter::answering(Some(true));

    let destroyed = apps::destroy(
        &api,
        &git,
        &prompter,
        &RecordingReporter::default(),
        "myapp",
        None,
    )
    .await
    .expect("destroy");

    assert!(destroyed);
    let asked = prompter.asked.borrow();
    assert_eq!(asked.len(), 1);
    assert!(asked[0].starts_with("myapp|WARNING: Potentially Destructive Action"));
    assert!(api.called("destroy_app myapp"));
}

#[tokio::test]
async fn destroy_declined_leaves_app_alone() {
    let api = MockPlatform::default();
    let git = MockGit::with_remotes(&[("heroku", "myapp")]);
    let prompter = MockPrompter::answering(Some(false));
    let reporter = RecordingReporter::default();

    let destroyed = apps::destroy(&api, &git, &prompter, &reporter, "myapp", None)
        .await
        .expect("destroy");

    assert!(!destroyed);
    assert!(!api.called("destroy_app"));
    assert!(git.calls().is_empty());
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn destroy_missing_app_fails_before_prompting() {
    let api = MockPlatform {
        info: None,
        ..MockPlatform::default()
    };
    let git = MockGit::outside_repo();
    let prompter = MockPrompter::answering(Some(true));

    let err = apps::destroy(
        &api,
        &git,
        &prompter,
        &RecordingReporter::default(),
        "ghost",
        None,
    )
    .await
    .expect_err("not found");

    assert_eq!(error_code(&err), "not_found");
    assert!(prompter.asked.borrow().is_empty());
    assert!(!api.called("destroy_app"));
}
