//! Checks command implementation.
//!
//! The `prguard checks` command lists the built-in check types.

use std::io::Write;

use serde::Serialize;

use crate::checks::CheckKind;
use crate::error::Result;
use crate::report::{OutputFormat, ReportTheme};

use super::dispatcher::{Command, CommandResult, GlobalOptions};

#[derive(Serialize)]
struct CheckEntry {
    check_type: &'static str,
    description: &'static str,
}

/// The checks command implementation.
pub struct ChecksCommand {
    options: GlobalOptions,
}

impl ChecksCommand {
    /// Create a new checks command.
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }
}

impl Command for ChecksCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let entries: Vec<CheckEntry> = CheckKind::ALL
            .iter()
            .map(|kind| CheckEntry {
                check_type: kind.as_str(),
                description: kind.description(),
            })
            .collect();

        match self.options.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &entries)
                    .map_err(|e| anyhow::anyhow!("Failed to write check list: {}", e))?;
                writeln!(out)?;
            }
            OutputFormat::Human => {
                let theme = ReportTheme::for_terminal(self.options.no_color);
                let width = entries.iter().map(|e| e.check_type.len()).max().unwrap_or(0);
                for entry in &entries {
                    writeln!(
                        out,
                        "{}  {}",
                        theme.check.apply_to(format!("{:width$}", entry.check_type)),
                        theme.dim.apply_to(entry.description)
                    )?;
                }
            }
        }

        Ok(CommandResult::success())
    }
}
