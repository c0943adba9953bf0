//! Rendering of suite results.
//!
//! - [`ConsoleReport`] - terminal output before and after a run
//! - [`JsonReport`] - machine-readable results for `--format json`
//! - [`PrCommentReport`] - Markdown summary posted on the pull request
//!
//! Reports only read [`CheckSuiteResults`]; they never change them.

pub mod comment;
pub mod console;
pub mod json;
pub mod style;

use std::collections::BTreeMap;
use std::io::Write;

use serde_json::Value;

use crate::results::CheckSuiteResults;

pub use comment::{PrCommentReport, REPORT_TITLE};
pub use console::ConsoleReport;
pub use json::JsonReport;
pub use style::{Glyph, ReportTheme};

/// Output format for run results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for writing run results.
pub trait ReportFormatter {
    /// Format results to the given writer.
    fn format<W: Write + ?Sized>(
        &self,
        results: &CheckSuiteResults,
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// Render result details as YAML. Empty details render as an empty string.
pub(crate) fn details_yaml(details: &BTreeMap<String, Value>) -> String {
    if details.is_empty() {
        return String::new();
    }
    match serde_yaml::to_string(details) {
        Ok(yaml) => yaml.trim_end().to_string(),
        Err(e) => format!("<details could not be rendered: {}>", e),
    }
}
