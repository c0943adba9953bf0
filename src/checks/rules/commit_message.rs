//! Commit message validation.
//!
//! Every commit of the change is checked against the same set of rules:
//!
//! - title length bounds (`title_max_length`, `title_min_length`)
//! - title format (`title_pattern`, matched from the start)
//! - body line length (`body_max_length`)
//! - a body of at least `body_min_lines` non-empty lines once the commit
//!   touches `body_required_min_changes` lines or more
//!
//! All violations across all commits are collected; the result's error code
//! is the code of the first one.

use regex::Regex;
use serde_json::{json, Value};

use crate::checks::check::{option_error, prefix_regex, Check};
use crate::config::CheckConfig;
use crate::content::{Content, FIELD_COMMITS};
use crate::results::{
    CheckResult, ERROR_COMMIT_BODY_LINE_TOO_LONG, ERROR_COMMIT_BODY_MISSING,
    ERROR_COMMIT_TITLE_TOO_LONG, ERROR_COMMIT_TITLE_TOO_SHORT, ERROR_INVALID_COMMIT_TITLE,
    ERROR_INVALID_CONTENT,
};

/// Default maximum title length.
pub const DEFAULT_TITLE_MAX_LENGTH: usize = 50;
/// Default maximum body line length.
pub const DEFAULT_BODY_MAX_LENGTH: usize = 72;
/// Default number of body lines required for large commits.
pub const DEFAULT_BODY_MIN_LINES: usize = 1;

/// Checks the title and body of every commit.
pub struct CommitMessageCheck {
    config: CheckConfig,
}

impl CommitMessageCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }
}

impl Check for CommitMessageCheck {
    fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn run(&self, content: &Content) -> CheckResult {
        let commits = match content.get(FIELD_COMMITS) {
            Some(Value::Array(commits)) if !commits.is_empty() => commits,
            Some(Value::Array(_)) | None => {
                return CheckResult::error(
                    &self.config,
                    ERROR_INVALID_CONTENT,
                    "Commit list not defined or empty",
                )
            }
            Some(_) => {
                return CheckResult::error(
                    &self.config,
                    ERROR_INVALID_CONTENT,
                    "Commit list must be a list of commits",
                )
            }
        };

        let rules = match Rules::from_config(&self.config) {
            Ok(rules) => rules,
            Err(result) => return result,
        };

        let mut violations = Vec::new();
        for (index, raw) in commits.iter().enumerate() {
            let commit = match Commit::parse(raw, rules.needs_stats()) {
                Ok(commit) => commit,
                Err(reason) => {
                    return CheckResult::error(
                        &self.config,
                        ERROR_INVALID_CONTENT,
                        format!("Invalid commit #{}: {}", index + 1, reason),
                    )
                }
            };
            rules.check(&commit, &mut violations);
        }

        let Some(first) = violations.first() else {
            return CheckResult::pass(&self.config).with_detail("commits", commits.len());
        };

        let message = if violations.len() == 1 {
            first.describe()
        } else {
            format!(
                "Found {} problems in commit messages, first: {}",
                violations.len(),
                first.describe()
            )
        };
        let code = first.code;

        CheckResult::fail(&self.config, code, message)
            .with_detail("commits", commits.len())
            .with_detail(
                "violations",
                violations.iter().map(Violation::to_json).collect::<Vec<_>>(),
            )
    }
}

/// Options resolved once per run.
struct Rules {
    title_max_length: usize,
    title_min_length: Option<usize>,
    title_pattern: Option<(String, Regex)>,
    body_max_length: usize,
    body_required_min_changes: Option<usize>,
    body_min_lines: usize,
}

impl Rules {
    fn from_config(config: &CheckConfig) -> Result<Self, CheckResult> {
        let usize_option = |name: &str| {
            config
                .option_usize(name)
                .map_err(|err| option_error(config, err))
        };

        let title_pattern = match config.option("title_pattern") {
            None => None,
            Some(_) => {
                let pattern = config
                    .option_str("title_pattern")
                    .map_err(|err| option_error(config, err))?;
                Some((pattern.to_string(), prefix_regex(config, pattern)?))
            }
        };

        Ok(Self {
            title_max_length: usize_option("title_max_length")?
                .unwrap_or(DEFAULT_TITLE_MAX_LENGTH),
            title_min_length: usize_option("title_min_length")?,
            title_pattern,
            body_max_length: usize_option("body_max_length")?.unwrap_or(DEFAULT_BODY_MAX_LENGTH),
            body_required_min_changes: usize_option("body_required_min_changes")?,
            body_min_lines: usize_option("body_min_lines")?.unwrap_or(DEFAULT_BODY_MIN_LINES),
        })
    }

    fn needs_stats(&self) -> bool {
        self.body_required_min_changes.is_some()
    }

    fn check<'a>(&self, commit: &Commit<'a>, violations: &mut Vec<Violation<'a>>) {
        let (title, body) = split_message(commit.message);
        let title_length = title.chars().count();
        let mut push = |code, message| {
            violations.push(Violation {
                sha: commit.sha,
                url: commit.url,
                code,
                message,
            })
        };

        if title_length > self.title_max_length {
            push(
                ERROR_COMMIT_TITLE_TOO_LONG,
                format!(
                    "Commit title is {} characters long, the maximum is {}",
                    title_length, self.title_max_length
                ),
            );
        }
        if let Some(min) = self.title_min_length {
            if title_length < min {
                push(
                    ERROR_COMMIT_TITLE_TOO_SHORT,
                    format!(
                        "Commit title is {} characters long, the minimum is {}",
                        title_length, min
                    ),
                );
            }
        }
        if let Some((pattern, regex)) = &self.title_pattern {
            if !regex.is_match(title) {
                push(
                    ERROR_INVALID_COMMIT_TITLE,
                    format!(
                        "Commit title \"{}\" doesn't match pattern: \"{}\"",
                        title, pattern
                    ),
                );
            }
        }

        for (index, line) in body.iter().enumerate() {
            let length = line.chars().count();
            if length > self.body_max_length {
                push(
                    ERROR_COMMIT_BODY_LINE_TOO_LONG,
                    format!(
                        "Commit body line {} is {} characters long, the maximum is {}",
                        index + 1,
                        length,
                        self.body_max_length
                    ),
                );
            }
        }

        if let (Some(min_changes), Some(total)) = (self.body_required_min_changes, commit.changes)
        {
            let body_lines = body.iter().filter(|line| !line.is_empty()).count();
            if total >= min_changes && body_lines < self.body_min_lines {
                push(
                    ERROR_COMMIT_BODY_MISSING,
                    format!(
                        "Commit changes {} lines and needs a body of at least {} line(s), found {}",
                        total, self.body_min_lines, body_lines
                    ),
                );
            }
        }
    }
}

/// The parts of a commit the rules look at.
struct Commit<'a> {
    sha: &'a str,
    url: &'a str,
    message: &'a str,
    changes: Option<usize>,
}

impl<'a> Commit<'a> {
    fn parse(value: &'a Value, needs_stats: bool) -> Result<Self, String> {
        let commit = value
            .as_object()
            .ok_or_else(|| "expected a mapping".to_string())?;
        let text = |key: &str| {
            commit
                .get(key)
                .and_then(Value::as_str)
                .ok_or_else(|| format!("Missing key: '{}'", key))
        };

        let sha = text("sha")?;
        let message = text("message")?;
        if message.trim().is_empty() {
            return Err(format!("Commit {} has an empty message", short_sha(sha)));
        }
        let url = commit.get("url").and_then(Value::as_str).unwrap_or("");

        let changes = if needs_stats {
            let stats = commit
                .get("stats")
                .ok_or_else(|| "Missing key: 'stats'".to_string())?;
            let total = stats
                .get("total")
                .and_then(Value::as_u64)
                .ok_or_else(|| "Missing key: 'stats.total'".to_string())?;
            Some(usize::try_from(total).unwrap_or(usize::MAX))
        } else {
            None
        };

        Ok(Self {
            sha,
            url,
            message,
            changes,
        })
    }
}

struct Violation<'a> {
    sha: &'a str,
    url: &'a str,
    code: &'static str,
    message: String,
}

impl Violation<'_> {
    fn describe(&self) -> String {
        format!("Commit {}: {}", short_sha(self.sha), self.message)
    }

    fn to_json(&self) -> Value {
        json!({
            "sha": self.sha,
            "url": self.url,
            "code": self.code,
            "message": self.message,
        })
    }
}

/// Title and body lines of a commit message.
///
/// Leading blank lines of the body and trailing whitespace are dropped.
fn split_message(message: &str) -> (&str, Vec<&str>) {
    let mut lines = message.trim_end().lines();
    let title = lines.next().unwrap_or("").trim_end();
    let body = lines
        .map(str::trim_end)
        .skip_while(|line| line.is_empty())
        .collect();
    (title, body)
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
