//! Shared report output for the checking commands.

use std::io::Write;

use super::dispatcher::{CommandResult, GlobalOptions, EXIT_CHECKS_FAILED};
use crate::error::Result;
use crate::report::{ConsoleReport, JsonReport, OutputFormat, ReportFormatter, ReportTheme};
use crate::results::CheckSuiteResults;
use crate::suite::CheckSuite;

/// When the detailed per-result listing is printed in human output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Details {
    Always,
    OnFailure,
}

/// Runs a suite and writes its report in the selected format.
pub struct SuiteOutput {
    format: OutputFormat,
    console: ConsoleReport,
}

impl SuiteOutput {
    pub fn new(options: &GlobalOptions) -> Self {
        Self {
            format: options.format,
            console: ConsoleReport::new(ReportTheme::for_terminal(options.no_color)),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn console(&self) -> &ConsoleReport {
        &self.console
    }

    /// Run `suite`, reporting before and after.
    pub fn run(
        &self,
        suite: &CheckSuite<'_>,
        target: &str,
        details: Details,
        out: &mut dyn Write,
    ) -> Result<CheckSuiteResults> {
        if self.format == OutputFormat::Human {
            write!(out, "{}", self.console.pre_run(&suite.check_types(), Some(target)))?;
        }

        let results = suite.run();
        tracing::debug!(
            "Suite finished: {} results, success={}",
            results.len(),
            results.is_success()
        );

        match self.format {
            OutputFormat::Json => JsonReport::new().format(&results, out)?,
            OutputFormat::Human => {
                if details == Details::Always || !results.is_success() {
                    write!(out, "{}", self.console.detailed(&results))?;
                }
                write!(out, "{}", self.console.summary(&results))?;
            }
        }
        Ok(results)
    }

    /// Print a status line in human output; log it otherwise.
    pub fn note(&self, out: &mut dyn Write, line: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => writeln!(out, "{}", line)?,
            OutputFormat::Json => tracing::info!("{}", console::strip_ansi_codes(line)),
        }
        Ok(())
    }
}

/// Exit status for a finished run.
pub fn exit_status(results: &CheckSuiteResults) -> CommandResult {
    if results.is_success() {
        CommandResult::success()
    } else {
        CommandResult::failure(EXIT_CHECKS_FAILED)
    }
}
