//! Content providers backed by the GitHub API.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{GithubClient, PullRequestRef};
use crate::checks::CheckKind;
use crate::content::{
    Content, ContentProvider, ContentProviderFactory, FetchContext, FIELD_BODY, FIELD_BRANCH,
    FIELD_COMMITS, FIELD_TITLE,
};
use crate::error::Result;

/// Provider name for PR metadata.
pub const PULL_REQUEST: &str = "pull_request";
/// Provider name for the PR's commit list.
pub const PULL_REQUEST_COMMITS: &str = "pull_request_commits";

/// Supplies `branch`, `title` and `body` of a pull request with one request.
pub struct PullRequestProvider {
    client: Arc<GithubClient>,
    target: PullRequestRef,
}

impl PullRequestProvider {
    pub fn new(client: Arc<GithubClient>, target: PullRequestRef) -> Self {
        Self { client, target }
    }
}

impl ContentProvider for PullRequestProvider {
    fn name(&self) -> &str {
        PULL_REQUEST
    }

    fn fetch_content(&self, ctx: &FetchContext) -> Result<Content> {
        let pr = self.client.pull_request(&self.target, ctx)?;
        Ok(Content::new()
            .with(FIELD_BRANCH, pr.head.name)
            .with(FIELD_TITLE, pr.title)
            .with(FIELD_BODY, pr.body.map_or(Value::Null, Value::from)))
    }
}

/// Supplies the `commits` of a pull request: `{message, sha, url}` each.
///
/// Needs the PR itself first (for its commits URL); that request is shared
/// with [`PullRequestProvider`] through the client cache.
pub struct PullRequestCommitsProvider {
    client: Arc<GithubClient>,
    target: PullRequestRef,
}

impl PullRequestCommitsProvider {
    pub fn new(client: Arc<GithubClient>, target: PullRequestRef) -> Self {
        Self { client, target }
    }
}

impl ContentProvider for PullRequestCommitsProvider {
    fn name(&self) -> &str {
        PULL_REQUEST_COMMITS
    }

    fn fetch_content(&self, ctx: &FetchContext) -> Result<Content> {
        let pr = self.client.pull_request(&self.target, ctx)?;
        let commits: Vec<Value> = self
            .client
            .commits(&pr, ctx)?
            .into_iter()
            .map(|c| {
                json!({
                    "message": c.commit.message,
                    "sha": c.sha,
                    "url": c.html_url,
                })
            })
            .collect();
        Ok(Content::new().with(FIELD_COMMITS, commits))
    }
}

/// Default providers for checking one pull request.
///
/// The five PR checks share [`PULL_REQUEST`]; `commit_message` uses
/// [`PULL_REQUEST_COMMITS`].
pub fn github_providers(client: Arc<GithubClient>, target: PullRequestRef) -> ContentProviderFactory {
    let mut factory = ContentProviderFactory::new();

    let (pr_client, pr_target) = (Arc::clone(&client), target.clone());
    factory.register_provider(PULL_REQUEST, move || {
        Box::new(PullRequestProvider::new(
            Arc::clone(&pr_client),
            pr_target.clone(),
        ))
    });
    factory.register_provider(PULL_REQUEST_COMMITS, move || {
        Box::new(PullRequestCommitsProvider::new(
            Arc::clone(&client),
            target.clone(),
        ))
    });

    for kind in CheckKind::ALL {
        let provider = match kind {
            CheckKind::CommitMessage => PULL_REQUEST_COMMITS,
            _ => PULL_REQUEST,
        };
        factory.assign(kind.as_str(), provider);
    }
    factory
}
