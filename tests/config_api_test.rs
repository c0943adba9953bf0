//! Integration tests for config module public API.

use prguard::config::{load_config, CheckConfig, FailureLevel, GuardConfig, DEFAULT_CONFIG_FILE};
use prguard::PrGuardError;
use std::fs;
use tempfile::TempDir;

#[test]
fn public_api_is_accessible() {
    let config = GuardConfig::default();
    assert!(config.checks.is_empty());
    assert!(config.settings.pr_comment_report.enabled);
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(DEFAULT_CONFIG_FILE),
        r#"
settings:
  pr_comment_report:
    show_details: true
checks:
  commit_message:
    title_max_length: 52
    failure_level: warning
  branch_name:
    pattern: '^(feature|bugfix)/'
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    assert!(config.settings.pr_comment_report.show_details);

    let types: Vec<_> = config.check_types().collect();
    assert_eq!(types, vec!["commit_message", "branch_name"]);

    let commit = CheckConfig::build("commit_message", &config.checks["commit_message"]).unwrap();
    assert_eq!(commit.failure_level, FailureLevel::Warning);
    assert!(commit.option("failure_level").is_none());
    assert_eq!(commit.option_usize("title_max_length").unwrap(), Some(52));
}

#[test]
fn json_config_file_is_accepted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prguard.json");
    fs::write(
        &path,
        r#"{"checks": {"pr_title": {"pattern": "^(feat|fix): "}}}"#,
    )
    .unwrap();

    let config = load_config(temp.path(), Some(&path)).unwrap();
    assert_eq!(config.checks["pr_title"]["pattern"], "^(feat|fix): ");
}

#[test]
fn invalid_failure_level_is_rejected_per_check() {
    let err = CheckConfig::build("branch_name", &serde_json::json!({"failure_level": "fatal"}))
        .unwrap_err();
    assert!(matches!(err, PrGuardError::InvalidCheckConfig { .. }));
}
