//! The subset of GitHub API payloads prguard reads.

use serde::Deserialize;

/// A pull request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// The description; GitHub sends `null` when it is empty.
    #[serde(default)]
    pub body: Option<String>,
    pub head: GitRef,
    pub commits_url: String,
    /// Issue comments endpoint of the PR.
    pub comments_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// The head or base of a pull request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GitRef {
    /// Branch name.
    #[serde(rename = "ref")]
    pub name: String,
    #[serde(default)]
    pub sha: String,
}

/// A commit as listed for a pull request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub html_url: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommitDetails {
    pub message: String,
}

/// An issue comment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: String,
}
