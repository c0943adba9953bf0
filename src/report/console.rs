//! Terminal output for a run.

use std::io::Write;

use super::style::{Glyph, ReportTheme};
use super::{details_yaml, ReportFormatter};
use crate::results::{CheckResult, CheckSuiteResults};

const RULE: &str = "-----------------";

/// Formats run progress and results for the terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReport {
    theme: ReportTheme,
}

impl ConsoleReport {
    pub fn new(theme: ReportTheme) -> Self {
        Self { theme }
    }

    /// Printed before the checks run.
    pub fn pre_run(&self, check_types: &[&str], target: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(target) = target {
            out.push_str(&format!("Checking {}\n", target));
        }
        out.push_str(&format!("Will run {} checks:\n", check_types.len()));
        for check_type in check_types {
            out.push_str(&format!(" - {}\n", self.theme.check.apply_to(check_type)));
        }
        out
    }

    /// Every result in detail, grouped into failures, warnings and passes.
    pub fn detailed(&self, results: &CheckSuiteResults) -> String {
        let mut out = String::new();
        let sections = [
            ("Failures", &self.theme.error, results.blocking()),
            ("Warnings", &self.theme.warning, results.warnings()),
            ("Successful checks", &self.theme.pass, results.passes()),
        ];
        for (title, style, section) in sections {
            out.push_str(&format!(
                "\n{}\n{}\n",
                style.apply_to(format!("{} ({})", title, section.len())),
                self.theme.dim.apply_to(RULE)
            ));
            for result in section {
                out.push_str(&self.format_result(result));
            }
        }
        out
    }

    /// Counts and check types per section, then the verdict.
    pub fn summary(&self, results: &CheckSuiteResults) -> String {
        let blocking = results.blocking();
        let warnings = results.warnings();
        let passes = results.passes();

        let mut out = String::from("\nSUMMARY\n-------\n");
        self.push_group(
            &mut out,
            &self.theme.fail,
            format!("Failures ({}) - These need to be fixed", blocking.len()),
            &blocking,
        );
        self.push_group(
            &mut out,
            &self.theme.warning,
            format!(
                "Warnings ({}) - Fixing these may not be applicable, please review them case by case",
                warnings.len()
            ),
            &warnings,
        );
        self.push_group(
            &mut out,
            &self.theme.pass,
            format!("Successful ({})", passes.len()),
            &passes,
        );

        let verdict = if results.is_success() {
            self.theme
                .pass
                .apply_to(format!("{} All required checks passed", Glyph::Pass.icon()))
        } else {
            self.theme.error.apply_to(format!(
                "{} {} check(s) need attention",
                Glyph::Fail.icon(),
                blocking.len()
            ))
        };
        out.push_str(&format!("{}\n", verdict));
        out
    }

    /// Printed when the report comment was posted.
    pub fn comment_created(&self, url: &str) -> String {
        format!(
            "{} {}",
            self.theme.pass.apply_to("Pull request comment created at:"),
            url
        )
    }

    /// Printed when earlier report comments were removed.
    pub fn comments_deleted(&self, count: usize) -> String {
        if count == 0 {
            "No previous report comment found to delete".to_string()
        } else {
            format!(
                "{}",
                self.theme
                    .pass
                    .apply_to(format!("Deleted {} previous report comment(s)", count))
            )
        }
    }

    /// Printed when posting or cleaning up comments failed.
    pub fn comment_error(&self, action: &str, error: &dyn std::fmt::Display) -> String {
        format!(
            "{}\n{}",
            self.theme.error.apply_to(format!("Error while {} comment:", action)),
            self.theme.fail.apply_to(error)
        )
    }

    fn push_group(
        &self,
        out: &mut String,
        style: &console::Style,
        heading: String,
        results: &[&CheckResult],
    ) {
        out.push_str(&format!("{}\n", style.apply_to(heading)));
        for result in results {
            out.push_str(&format!("- {}\n", self.theme.check.apply_to(result.check_type())));
        }
        out.push('\n');
    }

    fn format_result(&self, result: &CheckResult) -> String {
        let style = self.theme.for_result(result);
        let mut out = format!(
            "{} {} ... {}\n",
            style.apply_to(Glyph::of(result).icon()),
            self.theme.check.apply_to(result.check_type()),
            style.apply_to(result.status.to_string().to_uppercase())
        );
        if result.success() {
            return out;
        }

        if let Some(code) = &result.error_code {
            out.push_str(&format!("  {}: {}\n", self.theme.header.apply_to("Error code"), code));
        }
        if let Some(message) = &result.message {
            out.push_str(&format!("  {}: {}\n", self.theme.header.apply_to("Message"), message));
        }
        let details = details_yaml(&result.details);
        if !details.is_empty() {
            out.push_str(&format!("  {}:\n", self.theme.header.apply_to("Details")));
            for line in details.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        }
        out
    }
}

impl ReportFormatter for ConsoleReport {
    fn format<W: Write + ?Sized>(
        &self,
        results: &CheckSuiteResults,
        writer: &mut W,
    ) -> std::io::Result<()> {
        write!(writer, "{}", self.detailed(results))?;
        write!(writer, "{}", self.summary(results))
    }
}
