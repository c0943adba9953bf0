//! Branch name format validation.

use crate::checks::check::{option_error, prefix_regex, required_text, Check};
use crate::config::{CheckConfig, OptionError};
use crate::content::{Content, FIELD_BRANCH};
use crate::results::{CheckResult, ERROR_INVALID_BRANCH_NAME, ERROR_INVALID_CONFIG};

/// Checks that the source branch name matches `pattern`.
///
/// The pattern is matched from the start of the branch name. There is no
/// default pattern.
pub struct BranchNameCheck {
    config: CheckConfig,
}

impl BranchNameCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }
}

impl Check for BranchNameCheck {
    fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn run(&self, content: &Content) -> CheckResult {
        let branch = match required_text(&self.config, content, FIELD_BRANCH, "Branch name") {
            Ok(branch) => branch,
            Err(result) => return result,
        };

        let pattern = match self.config.option_str("pattern") {
            Ok(pattern) => pattern,
            Err(OptionError::Missing(_)) => {
                return CheckResult::error(
                    &self.config,
                    ERROR_INVALID_CONFIG,
                    "Branch name regex pattern not defined or empty",
                )
            }
            Err(err) => return option_error(&self.config, err),
        };

        let regex = match prefix_regex(&self.config, pattern) {
            Ok(regex) => regex,
            Err(result) => return result,
        };

        if !regex.is_match(branch) {
            return CheckResult::fail(
                &self.config,
                ERROR_INVALID_BRANCH_NAME,
                format!(
                    "Branch name \"{}\" doesn't match pattern: \"{}\"",
                    branch, pattern
                ),
            )
            .with_detail("branch", branch)
            .with_detail("pattern", pattern);
        }

        CheckResult::pass(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailureLevel;
    use crate::results::{CheckStatus, ERROR_INVALID_CONTENT};
    use serde_json::{json, Value};

    fn check(options: Value) -> BranchNameCheck {
        BranchNameCheck::new(CheckConfig::build("branch_name", &options).unwrap())
    }

    fn branch(name: &str) -> Content {
        Content::new().with(FIELD_BRANCH, name)
    }

    #[test]
    fn matching_branch_passes() {
        let result = check(json!({"pattern": "^feature/"})).run(&branch("feature/x"));
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.error_code.is_none());
    }

    #[test]
    fn non_matching_branch_fails() {
        let result = check(json!({"pattern": "^feature/"})).run(&branch("hotfix/x"));
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_BRANCH_NAME));
        assert_eq!(
            result.message.as_deref(),
            Some("Branch name \"hotfix/x\" doesn't match pattern: \"^feature/\"")
        );
    }

    #[test]
    fn pattern_matches_from_the_start() {
        let c = check(json!({"pattern": "feature/"}));
        assert!(c.run(&branch("feature/login")).success());
        assert!(!c.run(&branch("old-feature/login")).success());
        // Not anchored at the end unless the pattern says so.
        assert!(c.run(&branch("feature/login-and-more")).success());
    }

    #[test]
    fn full_match_with_end_anchor() {
        let c = check(json!({"pattern": "^[abc99]+$"}));
        assert!(c.run(&branch("ab9c9bb9ca9aa")).success());
        assert!(!c.run(&branch("ab9c9bb9-ca9aa")).success());
        assert!(!c.run(&branch("db9c9bb9ca9aa")).success());
    }

    #[test]
    fn empty_branch_is_invalid_content() {
        let result = check(json!({"pattern": "^feature/"})).run(&branch(""));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONTENT));
        assert_eq!(
            result.message.as_deref(),
            Some("Branch name not defined or empty")
        );
    }

    #[test]
    fn missing_branch_is_invalid_content() {
        let result = check(json!({"pattern": "^feature/"})).run(&Content::new());
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONTENT));
    }

    #[test]
    fn missing_or_empty_pattern_is_invalid_config() {
        for options in [json!({}), json!({"pattern": ""}), json!({"pattern": null})] {
            let result = check(options).run(&branch("x"));
            assert_eq!(result.status, CheckStatus::Error);
            assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONFIG));
            assert_eq!(
                result.message.as_deref(),
                Some("Branch name regex pattern not defined or empty")
            );
        }
    }

    #[test]
    fn content_is_checked_before_config() {
        let result = check(json!({})).run(&branch(""));
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONTENT));
    }

    #[test]
    fn invalid_regex_is_invalid_config() {
        let result = check(json!({"pattern": "(unclosed"})).run(&branch("x"));
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONFIG));
    }

    #[test]
    fn result_carries_the_config() {
        let result = check(json!({"pattern": "^x", "failure_level": "warning"}))
            .run(&branch("y"));
        assert_eq!(result.config.failure_level, FailureLevel::Warning);
        assert!(result.is_warning());
    }
}
