//! Error types for prguard operations.
//!
//! This module defines [`PrGuardError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PrGuardError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PrGuardError::Other`) for unexpected errors
//! - Errors raised while checking a single rule never escape the suite; they
//!   are turned into an error result for that check (see [`crate::suite`])

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for prguard operations.
#[derive(Debug, Error)]
pub enum PrGuardError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The options of a single check could not be turned into a config.
    #[error("Invalid configuration for check '{check_type}': {message}")]
    InvalidCheckConfig { check_type: String, message: String },

    /// A pull request URL did not have the expected shape.
    #[error("Invalid pull request URL: {url}")]
    InvalidPullRequestUrl { url: String },

    /// The hosting service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Api { status: u16, url: String },

    /// A git command exited unsuccessfully.
    #[error("git {command} failed: {message}")]
    GitCommand { command: String, message: String },

    /// The externally supplied deadline passed before the fetch completed.
    #[error("Deadline exceeded while fetching content")]
    DeadlineExceeded,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for prguard operations.
pub type Result<T> = std::result::Result<T, PrGuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PrGuardError::ConfigNotFound {
            path: PathBuf::from("/foo/.prguard.yml"),
        };
        assert!(err.to_string().contains("/foo/.prguard.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PrGuardError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn invalid_check_config_displays_type_and_message() {
        let err = PrGuardError::InvalidCheckConfig {
            check_type: "branch_name".into(),
            message: "unknown failure level".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("branch_name"));
        assert!(msg.contains("unknown failure level"));
    }

    #[test]
    fn api_error_displays_status_and_url() {
        let err = PrGuardError::Api {
            status: 404,
            url: "https://api.github.com/repos/a/b/pulls/1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("repos/a/b/pulls/1"));
    }

    #[test]
    fn git_command_displays_command_and_message() {
        let err = PrGuardError::GitCommand {
            command: "log".into(),
            message: "bad revision".into(),
        };
        assert_eq!(err.to_string(), "git log failed: bad revision");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PrGuardError = io_err.into();
        assert!(matches!(err, PrGuardError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: PrGuardError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.to_string(), "connection reset");
    }
}
