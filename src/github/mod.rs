//! GitHub integration.
//!
//! - [`PullRequestRef`] and [`parse_pr_url`] identify the pull request
//! - [`GithubClient`] talks to the REST API (blocking)
//! - [`providers`] supplies PR metadata and commits to the checks

pub mod client;
pub mod models;
pub mod providers;

use std::fmt;

use crate::error::{PrGuardError, Result};

pub use client::{GithubClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use models::{Comment, Commit, CommitDetails, GitRef, PullRequest};
pub use providers::{
    github_providers, PullRequestCommitsProvider, PullRequestProvider, PULL_REQUEST,
    PULL_REQUEST_COMMITS,
};

/// Identifies one pull request: `owner/repo` plus the PR number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestRef {
    /// Full repository name, `owner/repo`.
    pub repo: String,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(repo: impl Into<String>, number: u64) -> Self {
        Self {
            repo: repo.into(),
            number,
        }
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.number)
    }
}

/// Parse a pull request URL.
///
/// Accepts API URLs (`https://api.github.com/repos/<owner>/<repo>/pulls/<n>`)
/// and web URLs (`https://github.com/<owner>/<repo>/pull/<n>`). Only the last
/// four path segments are looked at.
pub fn parse_pr_url(url: &str) -> Result<PullRequestRef> {
    let invalid = || PrGuardError::InvalidPullRequestUrl {
        url: url.to_string(),
    };

    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').collect();
    let [owner, repo, kind, number] = segments
        .get(segments.len().saturating_sub(4)..)
        .and_then(|tail| <[&str; 4]>::try_from(tail).ok())
        .ok_or_else(invalid)?;

    if owner.is_empty() || repo.is_empty() || !matches!(kind, "pull" | "pulls") {
        return Err(invalid());
    }
    let number = number.parse::<u64>().map_err(|_| invalid())?;

    Ok(PullRequestRef::new(format!("{}/{}", owner, repo), number))
}
