//! Content retrieval for checks.
//!
//! Checks never fetch anything themselves. Each check type is associated
//! with a [`ContentProvider`] that knows how to retrieve exactly the data the
//! check needs (branch name, PR body, commit list...). The
//! [`ContentProviderFactory`] hands out providers wrapped in a
//! [`CachedProvider`], so the expensive retrieval happens at most once per
//! provider, and check types that need the same data share one provider.
//!
//! # Example
//!
//! ```
//! use prguard::content::{Content, ContentProvider, ContentProviderFactory, FetchContext};
//! use serde_json::json;
//!
//! struct StaticBranch;
//!
//! impl ContentProvider for StaticBranch {
//!     fn name(&self) -> &str {
//!         "static_branch"
//!     }
//!
//!     fn fetch_content(&self, _ctx: &FetchContext) -> prguard::Result<Content> {
//!         Ok(Content::new().with("branch", json!("feature/login")))
//!     }
//! }
//!
//! let mut factory = ContentProviderFactory::new();
//! factory.register("branch_name", "static_branch", || Box::new(StaticBranch));
//!
//! let provider = factory.create("branch_name").unwrap();
//! let content = provider.get_content(&FetchContext::new()).unwrap();
//! assert_eq!(content.get_str("branch"), Some("feature/login"));
//! assert!(factory.create("pr_title").is_none());
//! ```

pub mod cache;
pub mod context;
pub mod factory;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

pub use cache::CachedProvider;
pub use context::FetchContext;
pub use factory::{ContentProviderFactory, ProviderConstructor};

/// Content field holding the source branch name.
pub const FIELD_BRANCH: &str = "branch";
/// Content field holding the pull request title.
pub const FIELD_TITLE: &str = "title";
/// Content field holding the pull request description.
pub const FIELD_BODY: &str = "body";
/// Content field holding the list of commits.
pub const FIELD_COMMITS: &str = "commits";

/// Named fields supplied to a check.
///
/// The shape depends on the provider that produced it, not on the check.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Content(Map<String, Value>);

impl Content {
    /// Create empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Raw access to a field. Null counts as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// A string field, if present and a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Whether the field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// The field names, in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Content {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Retrieves the data a group of checks needs.
///
/// Implementations do the actual (possibly remote) retrieval in
/// [`fetch_content`](ContentProvider::fetch_content) on every call;
/// memoization is added by [`CachedProvider`], which is how the factory
/// hands providers out.
pub trait ContentProvider: Send + Sync {
    /// Identifier of this provider, used in logs and error messages.
    fn name(&self) -> &str;

    /// Retrieve the content. Blocking; must honour `ctx`'s deadline where
    /// it does I/O.
    fn fetch_content(&self, ctx: &FetchContext) -> Result<Content>;
}
