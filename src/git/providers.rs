//! Content providers backed by the local repository.

use serde_json::{json, Value};

use super::{GitRepo, MAX_COMMITS};
use crate::checks::CheckKind;
use crate::content::{
    Content, ContentProvider, ContentProviderFactory, FetchContext, FIELD_BRANCH, FIELD_COMMITS,
};
use crate::error::Result;

/// Provider name for the checked out branch.
pub const LOCAL_BRANCH: &str = "local_branch";
/// Provider name for the branch's commits.
pub const LOCAL_COMMITS: &str = "local_commits";

/// Supplies `branch`: the checked out branch name.
pub struct LocalBranchProvider {
    repo: GitRepo,
}

impl LocalBranchProvider {
    pub fn new(repo: GitRepo) -> Self {
        Self { repo }
    }
}

impl ContentProvider for LocalBranchProvider {
    fn name(&self) -> &str {
        LOCAL_BRANCH
    }

    fn fetch_content(&self, _ctx: &FetchContext) -> Result<Content> {
        let branch = self.repo.current_branch()?;
        Ok(Content::new().with(FIELD_BRANCH, branch.map_or(Value::Null, Value::from)))
    }
}

/// Supplies `commits` of the checked out branch, each with change stats.
pub struct LocalCommitsProvider {
    repo: GitRepo,
    base: Option<String>,
}

impl LocalCommitsProvider {
    pub fn new(repo: GitRepo, base: Option<String>) -> Self {
        Self { repo, base }
    }
}

impl ContentProvider for LocalCommitsProvider {
    fn name(&self) -> &str {
        LOCAL_COMMITS
    }

    fn fetch_content(&self, _ctx: &FetchContext) -> Result<Content> {
        let commits: Vec<Value> = self
            .repo
            .commits(self.base.as_deref(), MAX_COMMITS)?
            .into_iter()
            .map(|c| {
                json!({
                    "message": c.message,
                    "sha": c.sha,
                    "url": "",
                    "stats": {
                        "additions": c.additions,
                        "deletions": c.deletions,
                        "total": c.total(),
                    },
                })
            })
            .collect();
        Ok(Content::new().with(FIELD_COMMITS, commits))
    }
}

/// Default providers for checking a local repository.
///
/// Only `branch_name` and `commit_message` have local content; the PR
/// checks have no provider here.
pub fn local_providers(repo: GitRepo, base: Option<String>) -> ContentProviderFactory {
    let mut factory = ContentProviderFactory::new();

    let branch_repo = repo.clone();
    factory.register(CheckKind::BranchName.as_str(), LOCAL_BRANCH, move || {
        Box::new(LocalBranchProvider::new(branch_repo.clone()))
    });
    factory.register(CheckKind::CommitMessage.as_str(), LOCAL_COMMITS, move || {
        Box::new(LocalCommitsProvider::new(repo.clone(), base.clone()))
    });
    factory
}
