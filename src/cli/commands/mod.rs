//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `prguard pr` checks a GitHub pull request
//! - `prguard local` checks the local branch and commits
//! - `prguard checks` lists the check types

pub mod checks;
pub mod dispatcher;
pub mod display;
pub mod local;
pub mod pr;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, GlobalOptions, EXIT_CHECKS_FAILED, EXIT_ERROR,
};
