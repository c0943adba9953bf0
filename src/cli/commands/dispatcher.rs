//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::report::OutputFormat;

/// Exit code when at least one blocking check result was produced.
pub const EXIT_CHECKS_FAILED: i32 = 1;
/// Exit code for operational errors (unreadable config, bad PR URL, ...).
pub const EXIT_ERROR: i32 = 2;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing its report to `out`.
    ///
    /// Errors are operational failures; failed checks are a
    /// [`CommandResult`] with a non-zero exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Options shared by every command, taken from the global flags.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub project_root: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub no_color: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli, project_root: PathBuf) -> Self {
        Self {
            project_root,
            config: cli.config.clone(),
            format: cli.format,
            no_color: cli.no_color,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let options = GlobalOptions::from_cli(cli, self.project_root.clone());
        match &cli.command {
            Commands::Pr(args) => super::pr::PrCommand::new(options, args.clone()).execute(out),
            Commands::Local(args) => {
                super::local::LocalCommand::new(options, args.clone()).execute(out)
            }
            Commands::Checks => super::checks::ChecksCommand::new(options).execute(out),
        }
    }
}
