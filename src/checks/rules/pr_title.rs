//! PR title format validation.

use crate::checks::check::{option_error, prefix_regex, required_text, Check};
use crate::config::{CheckConfig, OptionError};
use crate::content::{Content, FIELD_TITLE};
use crate::results::{CheckResult, ERROR_INVALID_CONFIG, ERROR_INVALID_PR_TITLE};

/// Pattern used when the config has none: the title starts with a capital.
pub const DEFAULT_TITLE_PATTERN: &str = "^[A-Z]";

/// Checks that the PR title matches `pattern`, matched from the start.
pub struct PrTitleCheck {
    config: CheckConfig,
}

impl PrTitleCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    fn pattern(&self) -> Result<&str, CheckResult> {
        if self.config.option("pattern").is_none() {
            return Ok(DEFAULT_TITLE_PATTERN);
        }
        match self.config.option_str("pattern") {
            Ok(pattern) => Ok(pattern),
            Err(OptionError::Missing(_)) => Err(CheckResult::error(
                &self.config,
                ERROR_INVALID_CONFIG,
                "PR title regex pattern not defined or empty",
            )),
            Err(err) => Err(option_error(&self.config, err)),
        }
    }
}

impl Check for PrTitleCheck {
    fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn run(&self, content: &Content) -> CheckResult {
        let title = match required_text(&self.config, content, FIELD_TITLE, "PR title") {
            Ok(title) => title,
            Err(result) => return result,
        };
        let pattern = match self.pattern() {
            Ok(pattern) => pattern,
            Err(result) => return result,
        };
        let regex = match prefix_regex(&self.config, pattern) {
            Ok(regex) => regex,
            Err(result) => return result,
        };

        if !regex.is_match(title) {
            return CheckResult::fail(
                &self.config,
                ERROR_INVALID_PR_TITLE,
                format!("PR title \"{}\" doesn't match pattern: \"{}\"", title, pattern),
            )
            .with_detail("title", title)
            .with_detail("pattern", pattern);
        }

        CheckResult::pass(&self.config)
    }
}
