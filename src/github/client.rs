//! Blocking GitHub REST client.
//!
//! Every request honours the [`FetchContext`] it is given: no request starts
//! after the deadline, and each request's timeout is bounded by the time
//! left. Pull request metadata is cached per `(repo, number)`, so any number
//! of providers can ask for the same PR with a single request.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::models::{Comment, Commit, PullRequest};
use super::PullRequestRef;
use crate::content::FetchContext;
use crate::error::{PrGuardError, Result};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Per-request timeout when the caller sets none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PAGE_SIZE: usize = 100;

/// Client for the parts of the GitHub API prguard uses.
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
    timeout: Duration,
    pull_requests: Mutex<HashMap<PullRequestRef, PullRequest>>,
}

impl GithubClient {
    /// Create a client for the public API.
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("prguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            token: token.filter(|t| !t.is_empty()),
            timeout: DEFAULT_TIMEOUT,
            pull_requests: Mutex::new(HashMap::new()),
        })
    }

    /// Use another API endpoint (GitHub Enterprise, tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API endpoint in use.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a pull request, once per `(repo, number)`.
    pub fn pull_request(&self, target: &PullRequestRef, ctx: &FetchContext) -> Result<PullRequest> {
        let mut cache = self
            .pull_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pr) = cache.get(target) {
            return Ok(pr.clone());
        }

        let url = format!(
            "{}/repos/{}/pulls/{}",
            self.api_url, target.repo, target.number
        );
        tracing::debug!("Fetching pull request {}", target);
        let pr: PullRequest = self.get_json(&url, ctx)?;
        cache.insert(target.clone(), pr.clone());
        Ok(pr)
    }

    /// List the commits of a pull request, oldest first.
    pub fn commits(&self, pr: &PullRequest, ctx: &FetchContext) -> Result<Vec<Commit>> {
        tracing::debug!("Fetching commits of pull request #{}", pr.number);
        self.get_all(&pr.commits_url, ctx)
    }

    /// List the comments on a pull request.
    pub fn comments(&self, pr: &PullRequest, ctx: &FetchContext) -> Result<Vec<Comment>> {
        self.get_all(&pr.comments_url, ctx)
    }

    /// Post a comment on a pull request.
    pub fn create_comment(
        &self,
        pr: &PullRequest,
        body: &str,
        ctx: &FetchContext,
    ) -> Result<Comment> {
        let request = self
            .request(Method::POST, &pr.comments_url, ctx)?
            .json(&serde_json::json!({ "body": body }));
        let response = self.send(request, &pr.comments_url, ctx)?;
        parse_json(response, &pr.comments_url)
    }

    /// Delete an issue comment.
    pub fn delete_comment(&self, repo: &str, id: u64, ctx: &FetchContext) -> Result<()> {
        let url = format!("{}/repos/{}/issues/comments/{}", self.api_url, repo, id);
        let request = self.request(Method::DELETE, &url, ctx)?;
        self.send(request, &url, ctx)?;
        Ok(())
    }

    /// Delete every comment on the PR whose body starts with `marker`, except
    /// the comment with id `keep`. Returns the number of deleted comments.
    pub fn delete_previous_comments(
        &self,
        target: &PullRequestRef,
        pr: &PullRequest,
        marker: &str,
        keep: u64,
        ctx: &FetchContext,
    ) -> Result<usize> {
        let stale: Vec<u64> = self
            .comments(pr, ctx)?
            .into_iter()
            .filter(|c| c.id != keep)
            .filter(|c| c.body.as_deref().is_some_and(|b| b.starts_with(marker)))
            .map(|c| c.id)
            .collect();

        for id in &stale {
            tracing::debug!("Deleting previous report comment {}", id);
            self.delete_comment(&target.repo, *id, ctx)?;
        }
        Ok(stale.len())
    }

    fn request(&self, method: Method, url: &str, ctx: &FetchContext) -> Result<RequestBuilder> {
        ctx.ensure_time_left()?;

        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .timeout(ctx.bound(self.timeout));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    fn send(&self, request: RequestBuilder, url: &str, ctx: &FetchContext) -> Result<Response> {
        let response = match request.send() {
            Ok(response) => response,
            Err(e) if e.is_timeout() && ctx.is_expired() => {
                return Err(PrGuardError::DeadlineExceeded)
            }
            Err(e) => return Err(anyhow!(e).context(format!("Request to {} failed", url)).into()),
        };

        if !response.status().is_success() {
            return Err(PrGuardError::Api {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, ctx: &FetchContext) -> Result<T> {
        let request = self.request(Method::GET, url, ctx)?;
        let response = self.send(request, url, ctx)?;
        parse_json(response, url)
    }

    /// Fetch every page of a list endpoint.
    fn get_all<T: DeserializeOwned>(&self, url: &str, ctx: &FetchContext) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for page in 1.. {
            let page_url = format!("{}?per_page={}&page={}", url, PAGE_SIZE, page);
            let request = self.request(Method::GET, &page_url, ctx)?;
            let response = self.send(request, url, ctx)?;
            let batch: Vec<T> = parse_json(response, url)?;
            let last = batch.len() < PAGE_SIZE;
            items.extend(batch);
            if last {
                break;
            }
        }
        Ok(items)
    }
}

fn parse_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let value = response
        .json::<T>()
        .with_context(|| format!("Invalid JSON response from {}", url))?;
    Ok(value)
}
