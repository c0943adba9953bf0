//! Command-line interface for prguard.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, LocalArgs, PrArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, EXIT_CHECKS_FAILED, EXIT_ERROR};
