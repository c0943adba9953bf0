//! Configuration loading and the per-check configuration model.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Per-check configs and failure levels in [`check`]
//!
//! # Example
//!
//! ```
//! use prguard::config::{CheckConfig, FailureLevel};
//! use serde_json::json;
//!
//! let config = CheckConfig::build(
//!     "branch_name",
//!     &json!({"pattern": "^feature/", "failure_level": "warning"}),
//! )
//! .unwrap();
//! assert_eq!(config.failure_level, FailureLevel::Warning);
//! assert_eq!(config.option_str("pattern").unwrap(), "^feature/");
//! ```

pub mod check;
pub mod loader;
pub mod schema;

pub use check::{CheckConfig, FailureLevel, OptionError, FAILURE_LEVEL_KEY};
pub use loader::{config_path, load_config, load_config_file, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::{GuardConfig, PrCommentSettings, Settings};
