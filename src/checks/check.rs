//! Check definitions.
//!
//! This module provides the core trait and types for defining checks:
//!
//! - [`Check`] - The trait that all checks must implement
//! - [`CheckKind`] - The built-in check types

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::rules::{
    BranchNameCheck, CommitMessageCheck, PrBodyChecklistCheck, PrBodyExcludesCheck,
    PrBodyIncludesCheck, PrTitleCheck,
};
use crate::config::{CheckConfig, OptionError};
use crate::content::Content;
use crate::results::{CheckResult, ERROR_INVALID_CONFIG, ERROR_INVALID_CONTENT};

/// A validation rule bound to one [`CheckConfig`].
///
/// Checks are stateless apart from their configuration; `run` must be a
/// pure function of the content. Problems with the content or the options
/// are reported as results with status error, never as panics.
pub trait Check: Send + Sync {
    /// The configuration this check was built with.
    fn config(&self) -> &CheckConfig;

    /// Evaluate the check against the content.
    fn run(&self, content: &Content) -> CheckResult;

    /// The check type, e.g. `branch_name`.
    fn check_type(&self) -> &str {
        &self.config().check_type
    }
}

/// The built-in check types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    BranchName,
    PrTitle,
    PrBodyChecklist,
    PrBodyIncludes,
    PrBodyExcludes,
    CommitMessage,
}

impl CheckKind {
    /// All built-in kinds, in documentation order.
    pub const ALL: [CheckKind; 6] = [
        CheckKind::BranchName,
        CheckKind::PrTitle,
        CheckKind::PrBodyChecklist,
        CheckKind::PrBodyIncludes,
        CheckKind::PrBodyExcludes,
        CheckKind::CommitMessage,
    ];

    /// The check type identifier used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::BranchName => "branch_name",
            CheckKind::PrTitle => "pr_title",
            CheckKind::PrBodyChecklist => "pr_body_checklist",
            CheckKind::PrBodyIncludes => "pr_body_includes",
            CheckKind::PrBodyExcludes => "pr_body_excludes",
            CheckKind::CommitMessage => "commit_message",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            CheckKind::BranchName => "Branch name matches a regex pattern",
            CheckKind::PrTitle => "PR title matches a regex pattern",
            CheckKind::PrBodyChecklist => "Every checklist item in the PR body is ticked",
            CheckKind::PrBodyIncludes => "PR body contains all required patterns",
            CheckKind::PrBodyExcludes => "PR body contains none of the forbidden patterns",
            CheckKind::CommitMessage => "Commit titles and bodies follow length and format rules",
        }
    }

    /// Build the check for this kind.
    pub fn build(self, config: CheckConfig) -> Box<dyn Check> {
        match self {
            CheckKind::BranchName => Box::new(BranchNameCheck::new(config)),
            CheckKind::PrTitle => Box::new(PrTitleCheck::new(config)),
            CheckKind::PrBodyChecklist => Box::new(PrBodyChecklistCheck::new(config)),
            CheckKind::PrBodyIncludes => Box::new(PrBodyIncludesCheck::new(config)),
            CheckKind::PrBodyExcludes => Box::new(PrBodyExcludesCheck::new(config)),
            CheckKind::CommitMessage => Box::new(CommitMessageCheck::new(config)),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown check type \"{}\"", s))
    }
}

/// A non-empty string content field, or the `invalid_content` result.
pub(crate) fn required_text<'a>(
    config: &CheckConfig,
    content: &'a Content,
    field: &str,
    label: &str,
) -> Result<&'a str, CheckResult> {
    match content.get_str(field) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CheckResult::error(
            config,
            ERROR_INVALID_CONTENT,
            format!("{} not defined or empty", label),
        )),
    }
}

/// Turn an option problem into the `invalid_config` result.
pub(crate) fn option_error(config: &CheckConfig, err: OptionError) -> CheckResult {
    CheckResult::error(config, ERROR_INVALID_CONFIG, capitalize(&err.to_string()))
}

/// Compile a pattern that must match at the start of the text.
pub(crate) fn prefix_regex(config: &CheckConfig, pattern: &str) -> Result<Regex, CheckResult> {
    compile(config, &format!(r"\A(?:{})", pattern), pattern)
}

/// Compile a pattern that may match anywhere in the text.
pub(crate) fn search_regex(config: &CheckConfig, pattern: &str) -> Result<Regex, CheckResult> {
    compile(config, pattern, pattern)
}

fn compile(config: &CheckConfig, source: &str, pattern: &str) -> Result<Regex, CheckResult> {
    Regex::new(source).map_err(|err| {
        CheckResult::error(
            config,
            ERROR_INVALID_CONFIG,
            format!("Invalid regex pattern \"{}\": {}", pattern, err),
        )
    })
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailureLevel;
    use crate::results::CheckStatus;
    use serde_json::Map;

    fn config() -> CheckConfig {
        CheckConfig::new("x", FailureLevel::Error, Map::new())
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.as_str().parse::<CheckKind>(), Ok(kind));
        }
        assert!("nope".parse::<CheckKind>().is_err());
    }

    #[test]
    fn kind_builds_matching_check() {
        let check = CheckKind::PrTitle.build(CheckConfig::new(
            "pr_title",
            FailureLevel::Warning,
            Map::new(),
        ));
        assert_eq!(check.check_type(), "pr_title");
        assert_eq!(check.config().failure_level, FailureLevel::Warning);
    }

    #[test]
    fn required_text_rejects_missing_and_empty() {
        let c = config();
        let content = Content::new().with("branch", "").with("title", "Hi");

        let err = required_text(&c, &content, "branch", "Branch name").unwrap_err();
        assert_eq!(err.status, CheckStatus::Error);
        assert_eq!(err.error_code.as_deref(), Some(ERROR_INVALID_CONTENT));
        assert_eq!(err.message.as_deref(), Some("Branch name not defined or empty"));

        assert!(required_text(&c, &content, "body", "PR body").is_err());
        assert_eq!(required_text(&c, &content, "title", "PR title").unwrap(), "Hi");
    }

    #[test]
    fn prefix_regex_anchors_at_start_only() {
        let re = prefix_regex(&config(), "feat").unwrap();
        assert!(re.is_match("feature/x"));
        assert!(!re.is_match("my-feature"));

        let alternation = prefix_regex(&config(), "a|b").unwrap();
        assert!(!alternation.is_match("xb"));
    }

    #[test]
    fn search_regex_matches_anywhere() {
        let re = search_regex(&config(), "feat").unwrap();
        assert!(re.is_match("my-feature"));
    }

    #[test]
    fn invalid_regex_is_a_config_error() {
        let err = prefix_regex(&config(), "([a-z").unwrap_err();
        assert_eq!(err.error_code.as_deref(), Some(ERROR_INVALID_CONFIG));
        assert!(err.message.unwrap().contains("([a-z"));
    }

    #[test]
    fn option_error_is_capitalized() {
        let result = option_error(&config(), OptionError::Missing("pattern".into()));
        assert_eq!(
            result.message.as_deref(),
            Some("Option \"pattern\" not defined or empty")
        );
    }
}
