//! Checks and the check registry.
//!
//! # Overview
//!
//! - **Checks** - Individual validation rules ([`Check`] trait)
//! - **Kinds** - The built-in check types ([`CheckKind`])
//! - **Registry** - Check type to constructor mapping ([`CheckRegistry`])
//!
//! # Example
//!
//! ```
//! use prguard::checks::CheckRegistry;
//! use prguard::config::CheckConfig;
//! use prguard::content::Content;
//! use serde_json::json;
//!
//! let registry = CheckRegistry::with_builtins();
//! let config = CheckConfig::build("branch_name", &json!({"pattern": "^feature/"})).unwrap();
//! let check = registry.create(&config).unwrap();
//!
//! let result = check.run(&Content::new().with("branch", "feature/login"));
//! assert!(result.success());
//! ```

pub mod check;
pub mod registry;
pub mod rules;

pub use check::{Check, CheckKind};
pub use registry::{CheckConstructor, CheckRegistry};
pub use rules::{
    BranchNameCheck, CommitMessageCheck, PrBodyChecklistCheck, PrBodyExcludesCheck,
    PrBodyIncludesCheck, PrTitleCheck,
};
