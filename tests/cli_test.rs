//! Integration tests for the prguard binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

// Serialize git-process tests to avoid flaky failures under parallel execution
static GIT_LOCK: Mutex<()> = Mutex::new(());

fn prguard() -> Command {
    let mut cmd = Command::new(cargo_bin("prguard"));
    cmd.env_remove("GITHUB_ACCESS_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
        .status;
    assert!(status.success(), "git {} failed", args.join(" "));
}

fn setup_repo(branch: &str, message: &str, config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    git(dir, &["init", "--initial-branch=main"]);
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    fs::write(dir.join("README.md"), "hello\n").unwrap();
    git(dir, &["add", "README.md"]);
    git(dir, &["commit", "-m", "Initial commit"]);
    git(dir, &["checkout", "-b", branch]);
    fs::write(dir.join("a.txt"), "one\n").unwrap();
    git(dir, &["add", "a.txt"]);
    git(dir, &["commit", "-m", message]);
    fs::write(dir.join(".prguard.yml"), config).unwrap();
    temp
}

const LOCAL_CONFIG: &str = r#"
checks:
  branch_name:
    pattern: '^(feature|bugfix)/'
  commit_message:
    title_max_length: 30
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = prguard();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Check a GitHub pull request"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = prguard();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_checks_lists_types() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = prguard();
    cmd.args(["checks", "--no-color"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("branch_name"))
        .stdout(predicate::str::contains("commit_message"))
        .stdout(predicate::str::contains("pr_body_excludes"));
    Ok(())
}

#[test]
fn cli_local_passing_branch_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let _lock = GIT_LOCK.lock().unwrap();
    let temp = setup_repo("feature/login", "Add login form", LOCAL_CONFIG);

    let mut cmd = prguard();
    cmd.current_dir(temp.path()).args(["local", "--base", "main", "--no-color"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Will run 2 checks:"))
        .stdout(predicate::str::contains("All required checks passed"));
    Ok(())
}

#[test]
fn cli_local_failing_branch_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let _lock = GIT_LOCK.lock().unwrap();
    let temp = setup_repo("wip-login", "Add login form", LOCAL_CONFIG);

    let mut cmd = prguard();
    cmd.current_dir(temp.path()).args(["local", "--no-color"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("branch_name ... FAIL"))
        .stdout(predicate::str::contains("invalid_branch_name"));
    Ok(())
}

#[test]
fn cli_local_warning_does_not_fail() -> Result<(), Box<dyn std::error::Error>> {
    let _lock = GIT_LOCK.lock().unwrap();
    let config = "checks:\n  branch_name:\n    pattern: '^feature/'\n    failure_level: warning\n";
    let temp = setup_repo("wip-login", "Add login form", config);

    let mut cmd = prguard();
    cmd.current_dir(temp.path()).args(["local", "--no-color"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Warnings (1)"));
    Ok(())
}

#[test]
fn cli_local_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let _lock = GIT_LOCK.lock().unwrap();
    let temp = setup_repo("feature/login", "Add login form", LOCAL_CONFIG);

    let output = prguard()
        .current_dir(temp.path())
        .args(["local", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["success"], true);
    assert_eq!(value["summary"]["total"], 2);
    Ok(())
}

#[test]
fn cli_missing_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = prguard();
    cmd.current_dir(temp.path()).args(["local"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_invalid_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("custom.yml"), "checks: [unclosed")?;

    let mut cmd = prguard();
    cmd.current_dir(temp.path())
        .args(["--config", "custom.yml", "local"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_pr_bad_url_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join(".prguard.yml"), "checks: {}\n")?;

    let mut cmd = prguard();
    cmd.current_dir(temp.path())
        .args(["pr", "--pr-url", "https://github.com/acme"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid pull request URL"));
    Ok(())
}

#[test]
fn cli_pr_checks_pull_request_and_comments() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let commits_url = server.url("/repos/acme/widgets/pulls/7/commits");
    let comments_url = server.url("/repos/acme/widgets/issues/7/comments");
    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/pulls/7");
        then.status(200).json_body(json!({
            "number": 7,
            "title": "Add login",
            "body": "Closes #3\n\n- [x] tests\n- [ ] docs",
            "head": {"ref": "feature/login"},
            "commits_url": commits_url,
            "comments_url": comments_url
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets/pulls/7/commits");
        then.status(200).json_body(json!([
            {"sha": "a1b2c3d4e5", "html_url": "https://c/1", "commit": {"message": "Add login form"}}
        ]));
    });
    let comment = server.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/issues/7/comments");
        then.status(201).json_body(json!({
            "id": 99,
            "body": "# Pull Request Health Check",
            "html_url": "https://github.com/acme/widgets/pull/7#issuecomment-99"
        }));
    });

    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".prguard.yml"),
        r#"
checks:
  branch_name:
    pattern: '^feature/'
  pr_title: ~
  pr_body_checklist:
    failure_level: warning
  pr_body_includes:
    patterns: ['Closes #\d+']
  commit_message: ~
"#,
    )?;

    let mut cmd = prguard();
    cmd.current_dir(temp.path()).args([
        "pr",
        "--pr-url",
        "https://github.com/acme/widgets/pull/7",
        "--api-url",
        &server.base_url(),
        "--token",
        "secret",
        "--no-color",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Checking acme/widgets#7"))
        .stdout(predicate::str::contains("Warnings (1)"))
        .stdout(predicate::str::contains(
            "Pull request comment created at: https://github.com/acme/widgets/pull/7#issuecomment-99",
        ));
    comment.assert();
    Ok(())
}

#[test]
fn cli_pr_unreachable_api_is_a_check_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".prguard.yml"),
        "settings:\n  pr_comment_report:\n    enabled: false\nchecks:\n  pr_title: ~\n",
    )?;

    let mut cmd = prguard();
    cmd.current_dir(temp.path()).args([
        "pr",
        "--pr-url",
        "https://github.com/acme/widgets/pull/7",
        "--api-url",
        "http://127.0.0.1:9",
        "--timeout",
        "5",
        "--no-color",
    ]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("content_unavailable"));
    Ok(())
}
