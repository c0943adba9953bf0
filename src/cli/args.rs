//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

use crate::report::OutputFormat;

/// prguard - Pull request metadata checks.
#[derive(Debug, Parser)]
#[command(name = "prguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .prguard.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a GitHub pull request
    Pr(PrArgs),

    /// Check the branch and commits of a local repository
    Local(LocalArgs),

    /// List the available check types
    Checks,
}

/// Arguments for the `pr` command.
#[derive(Clone, clap::Args)]
pub struct PrArgs {
    /// Pull request URL (web or API form)
    #[arg(long, value_name = "URL")]
    pub pr_url: String,

    /// Link added to the PR comment for more information
    #[arg(long, value_name = "URL")]
    pub details_url: Option<String>,

    /// GitHub access token
    #[arg(long, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = crate::github::DEFAULT_API_URL)]
    pub api_url: String,

    /// Overall time limit in seconds for fetching content
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Do not post a comment on the pull request
    #[arg(long)]
    pub no_comment: bool,
}

// The token must never reach the debug log.
impl fmt::Debug for PrArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrArgs")
            .field("pr_url", &self.pr_url)
            .field("details_url", &self.details_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("no_comment", &self.no_comment)
            .finish()
    }
}

/// Arguments for the `local` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LocalArgs {
    /// Path to the repository (overrides current directory)
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Base ref; commits in `<base>..HEAD` are checked (default: the tip commit only)
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,
}
