//! Check results and their aggregation.
//!
//! Every check execution produces exactly one [`CheckResult`]. A suite run
//! collects them into [`CheckSuiteResults`], which answers the questions the
//! reports and the exit status need: did everything succeed, which results
//! block the run, which are only warnings.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::{CheckConfig, FailureLevel};

/// Required content was missing or empty.
pub const ERROR_INVALID_CONTENT: &str = "invalid_content";
/// A required option was missing, empty, or malformed.
pub const ERROR_INVALID_CONFIG: &str = "invalid_config";
/// No check is registered for the configured type.
pub const ERROR_UNKNOWN_CHECK_TYPE: &str = "unknown_check_type";
/// No content provider is registered for the configured type.
pub const ERROR_MISSING_CONTENT_PROVIDER: &str = "missing_content_provider";
/// The content provider failed to fetch.
pub const ERROR_CONTENT_UNAVAILABLE: &str = "content_unavailable";
/// The check panicked.
pub const ERROR_UNEXPECTED: &str = "unexpected_error";

pub const ERROR_INVALID_BRANCH_NAME: &str = "invalid_branch_name";
pub const ERROR_INVALID_PR_TITLE: &str = "invalid_pr_title";
pub const ERROR_UNFINISHED_CHECKLIST: &str = "unfinished_checklist";
pub const ERROR_MISSING_PR_BODY_TEXT: &str = "missing_pr_body_text";
pub const ERROR_FORBIDDEN_PR_BODY_TEXT: &str = "forbidden_pr_body_text";
pub const ERROR_COMMIT_TITLE_TOO_LONG: &str = "commit_title_too_long";
pub const ERROR_COMMIT_TITLE_TOO_SHORT: &str = "commit_title_too_short";
pub const ERROR_INVALID_COMMIT_TITLE: &str = "invalid_commit_title";
pub const ERROR_COMMIT_BODY_LINE_TOO_LONG: &str = "commit_body_line_too_long";
pub const ERROR_COMMIT_BODY_MISSING: &str = "commit_body_missing";

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The content satisfied the rule.
    Pass,
    /// The content was well-formed but did not satisfy the rule.
    Fail,
    /// The check could not be evaluated.
    Error,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Fail => write!(f, "fail"),
            CheckStatus::Error => write!(f, "error"),
        }
    }
}

/// The result of a single check that was performed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// The configuration the check ran with.
    pub config: CheckConfig,
    /// How the check went.
    pub status: CheckStatus,
    /// Machine-readable reason for a non-passing status.
    pub error_code: Option<String>,
    /// Human-readable explanation.
    pub message: Option<String>,
    /// Check-specific extra information.
    pub details: BTreeMap<String, Value>,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(config: &CheckConfig) -> Self {
        Self {
            config: config.clone(),
            status: CheckStatus::Pass,
            error_code: None,
            message: None,
            details: BTreeMap::new(),
        }
    }

    /// A failed result: the rule was evaluated and not satisfied.
    pub fn fail(config: &CheckConfig, error_code: &str, message: impl Into<String>) -> Self {
        Self {
            config: config.clone(),
            status: CheckStatus::Fail,
            error_code: Some(error_code.to_string()),
            message: Some(message.into()),
            details: BTreeMap::new(),
        }
    }

    /// An erroneous result: the rule could not be evaluated.
    pub fn error(config: &CheckConfig, error_code: &str, message: impl Into<String>) -> Self {
        Self {
            config: config.clone(),
            status: CheckStatus::Error,
            error_code: Some(error_code.to_string()),
            message: Some(message.into()),
            details: BTreeMap::new(),
        }
    }

    /// Attach an extra detail.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// The check type this result belongs to.
    pub fn check_type(&self) -> &str {
        &self.config.check_type
    }

    /// True if the check passed.
    pub fn success(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    /// True if this result fails the overall run.
    ///
    /// Errors always block; failures block only at [`FailureLevel::Error`].
    pub fn is_blocking(&self) -> bool {
        match self.status {
            CheckStatus::Pass => false,
            CheckStatus::Error => true,
            CheckStatus::Fail => self.config.failure_level == FailureLevel::Error,
        }
    }

    /// True if this is a failure that is only reported.
    pub fn is_warning(&self) -> bool {
        self.status == CheckStatus::Fail && self.config.failure_level == FailureLevel::Warning
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CheckResult type={}, status={}, error_code={}",
            self.config.check_type,
            self.status,
            self.error_code.as_deref().unwrap_or("-")
        )
    }
}

/// The results of all checks of one suite run, keyed by check type and kept
/// in run order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckSuiteResults {
    results: Vec<CheckResult>,
}

impl CheckSuiteResults {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result. A second result for the same check type replaces the
    /// first one in place.
    pub fn add(&mut self, result: CheckResult) {
        match self
            .results
            .iter_mut()
            .find(|r| r.config.check_type == result.config.check_type)
        {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    /// The result for a check type.
    pub fn get(&self, check_type: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.config.check_type == check_type)
    }

    /// All results in run order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no result is stored.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True iff no result has status error and no failure is at error level.
    pub fn is_success(&self) -> bool {
        !self.results.iter().any(CheckResult::is_blocking)
    }

    /// Results with status error.
    pub fn errors(&self) -> Vec<&CheckResult> {
        self.with_status(CheckStatus::Error)
    }

    /// Results with status fail, at any level.
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.with_status(CheckStatus::Fail)
    }

    /// Results with status pass.
    pub fn passes(&self) -> Vec<&CheckResult> {
        self.with_status(CheckStatus::Pass)
    }

    /// Results that fail the run: all errors plus error-level failures.
    pub fn blocking(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| r.is_blocking()).collect()
    }

    /// Warning-level failures.
    pub fn warnings(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| r.is_warning()).collect()
    }

    fn with_status(&self, status: CheckStatus) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| r.status == status).collect()
    }
}

impl<'a> IntoIterator for &'a CheckSuiteResults {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
