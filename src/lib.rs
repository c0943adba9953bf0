//! prguard - Pull request metadata checks.
//!
//! prguard validates the metadata of a pull request (branch name, title,
//! body, commit messages) against configurable rules and reports pass or
//! fail per rule.
//!
//! # Modules
//!
//! - [`checks`] - The `Check` trait, the check registry and built-in checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and per-check configs
//! - [`content`] - Content providers with fetch-once caching
//! - [`error`] - Error types and result aliases
//! - [`git`] - Content from a local git repository
//! - [`github`] - Content from the GitHub REST API, PR comments
//! - [`report`] - Console, JSON and PR comment reports
//! - [`results`] - Check results and their aggregation
//! - [`suite`] - Running configured checks
//!
//! # Example
//!
//! ```
//! use prguard::checks::CheckRegistry;
//! use prguard::content::{Content, ContentProvider, ContentProviderFactory, FetchContext};
//! use prguard::suite::CheckSuite;
//!
//! struct Branch;
//!
//! impl ContentProvider for Branch {
//!     fn name(&self) -> &str {
//!         "branch"
//!     }
//!
//!     fn fetch_content(&self, _ctx: &FetchContext) -> prguard::Result<Content> {
//!         Ok(Content::new().with("branch", "feature/login"))
//!     }
//! }
//!
//! let registry = CheckRegistry::with_builtins();
//! let mut providers = ContentProviderFactory::new();
//! providers.register("branch_name", "branch", || Box::new(Branch));
//!
//! let checks = serde_json::json!({"branch_name": {"pattern": "^feature/"}});
//! let suite = CheckSuite::new(checks.as_object().unwrap(), &registry, &providers);
//! assert!(suite.run().is_success());
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod git;
pub mod github;
pub mod report;
pub mod results;
pub mod suite;

pub use error::{PrGuardError, Result};
