//! Markdown summary posted as a pull request comment.

use std::sync::LazyLock;

use regex::Regex;

use super::details_yaml;
use crate::config::PrCommentSettings;
use crate::results::{CheckResult, CheckSuiteResults};

/// First line of every report comment. Earlier reports are found by it.
pub const REPORT_TITLE: &str = "# Pull Request Health Check";

const INTRO: &str = "Checking if this PR follows the expected quality standards. \
                     Powered by [prguard](https://github.com/prguard/prguard).\n";

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"("[^"]+")"#).expect("quoted span regex is valid"));

/// Builds the pull request comment for a run.
#[derive(Debug, Clone)]
pub struct PrCommentReport {
    settings: PrCommentSettings,
    details_url: Option<String>,
}

impl PrCommentReport {
    pub fn new(settings: PrCommentSettings) -> Self {
        Self {
            settings,
            details_url: None,
        }
    }

    /// Link to a page with the full results, added at the end of the comment.
    pub fn with_details_url(mut self, url: impl Into<String>) -> Self {
        self.details_url = Some(url.into());
        self
    }

    /// The comment body.
    pub fn render(&self, results: &CheckSuiteResults) -> String {
        let blocking = results.blocking();
        let warnings = results.warnings();
        let passes = results.passes();
        let show_empty = self.settings.show_empty_sections;

        let mut lines = vec![REPORT_TITLE.to_string(), INTRO.to_string()];

        if results.is_empty() {
            lines.push(
                ":interrobang: No quality checks found to run. Please update your config!"
                    .to_string(),
            );
        } else if blocking.is_empty() && warnings.is_empty() {
            lines.push(format!(
                ":white_check_mark: All {} quality checks have passed! Good job!",
                passes.len()
            ));
        } else {
            lines.push(format!(
                "failures | warnings | successful\n\
                 ----------- | ------------- | -------------\n\
                 |{} | {} | {}\n",
                count_cell(blocking.len()),
                count_cell(warnings.len()),
                count_cell(passes.len())
            ));

            if !blocking.is_empty() || show_empty {
                lines.push(format!(
                    ":bangbang: **Failures ({})** - *These need to be fixed!*",
                    blocking.len()
                ));
                lines.extend(blocking.iter().map(|r| self.format_result(r)));
                lines.push(String::new());
            }

            if !warnings.is_empty() || show_empty {
                lines.push(format!(
                    ":eight_pointed_black_star: **Warnings ({})** - \
                     *Fixing these may not be applicable, please review them case by case*",
                    warnings.len()
                ));
                lines.extend(warnings.iter().map(|r| self.format_result(r)));
                lines.push(String::new());
            }
        }

        if self.settings.show_successful && (!passes.is_empty() || show_empty) {
            lines.push(format!(
                ":white_check_mark: **Successful ({})** - *Good job on these!*",
                passes.len()
            ));
            lines.extend(passes.iter().map(|r| format!("- **{}**", r.check_type())));
            lines.push(String::new());
        }

        if let Some(url) = &self.details_url {
            lines.push(format!(
                "Visit the [details page]({}) for more information.",
                url
            ));
        }

        lines.join("\n")
    }

    fn format_result(&self, result: &CheckResult) -> String {
        let mut line = format!("- **{}**", result.check_type());

        if self.settings.show_message {
            let message = result.message.as_deref().unwrap_or_default();
            if !message.is_empty() {
                let message = emphasize_quoted(message).replace("Explanation:", "\n  Explanation:");
                line.push_str("\n  ");
                line.push_str(&message);
            }
        }

        if self.settings.show_details {
            let details = details_yaml(&result.details);
            if !details.is_empty() {
                for detail in emphasize_quoted(&details).lines() {
                    line.push_str("\n  ");
                    line.push_str(detail);
                }
            }
        }
        line
    }
}

/// Wrap every `"quoted"` span in backticks.
fn emphasize_quoted(text: &str) -> String {
    QUOTED.replace_all(text, "`$1`").into_owned()
}

fn count_cell(count: usize) -> String {
    if count == 0 {
        "-".to_string()
    } else {
        count.to_string()
    }
}
