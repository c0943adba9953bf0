//! Pr command implementation.
//!
//! The `prguard pr` command checks a GitHub pull request and, unless turned
//! off, posts the results as a comment on it.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::checks::CheckRegistry;
use crate::cli::args::PrArgs;
use crate::config::{load_config, GuardConfig};
use crate::content::FetchContext;
use crate::error::Result;
use crate::github::{github_providers, parse_pr_url, GithubClient, PullRequestRef};
use crate::report::{PrCommentReport, REPORT_TITLE};
use crate::results::CheckSuiteResults;
use crate::suite::CheckSuite;

use super::dispatcher::{Command, CommandResult, GlobalOptions};
use super::display::{exit_status, Details, SuiteOutput};

/// The pr command implementation.
pub struct PrCommand {
    options: GlobalOptions,
    args: PrArgs,
}

impl PrCommand {
    /// Create a new pr command.
    pub fn new(options: GlobalOptions, args: PrArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &PrArgs {
        &self.args
    }

    /// Post the report comment and clean up older ones.
    ///
    /// Failures are reported and swallowed; they never change the exit
    /// status of the run.
    fn post_comment(
        &self,
        client: &GithubClient,
        target: &PullRequestRef,
        config: &GuardConfig,
        results: &CheckSuiteResults,
        output: &SuiteOutput,
        out: &mut dyn Write,
    ) -> Result<()> {
        let settings = &config.settings.pr_comment_report;
        let mut report = PrCommentReport::new(settings.clone());
        if let Some(url) = &self.args.details_url {
            report = report.with_details_url(url.as_str());
        }
        let body = report.render(results);
        let ctx = FetchContext::new();
        let console = output.console();

        let created = client
            .pull_request(target, &ctx)
            .and_then(|pr| client.create_comment(&pr, &body, &ctx).map(|c| (pr, c)));
        let (pr, comment) = match created {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!("Could not create PR comment: {}", e);
                return output.note(out, &console.comment_error("creating", &e));
            }
        };
        output.note(out, &console.comment_created(&comment.html_url))?;

        if !settings.delete_previous {
            return Ok(());
        }
        match client.delete_previous_comments(target, &pr, REPORT_TITLE, comment.id, &ctx) {
            Ok(count) => output.note(out, &console.comments_deleted(count)),
            Err(e) => {
                tracing::warn!("Could not delete previous PR comments: {}", e);
                output.note(out, &console.comment_error("deleting", &e))
            }
        }
    }
}

impl Command for PrCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = load_config(&self.options.project_root, self.options.config.as_deref())?;
        let target = parse_pr_url(&self.args.pr_url)?;

        let client = Arc::new(
            GithubClient::new(self.args.token.clone())?.with_api_url(self.args.api_url.as_str()),
        );
        let providers = github_providers(Arc::clone(&client), target.clone());
        let registry = CheckRegistry::with_builtins();

        let mut suite = CheckSuite::new(&config.checks, &registry, &providers);
        if let Some(seconds) = self.args.timeout {
            suite = suite.with_deadline(Instant::now() + Duration::from_secs(seconds));
        }

        let output = SuiteOutput::new(&self.options);
        let results = output.run(&suite, &target.to_string(), Details::Always, out)?;

        if config.settings.pr_comment_report.enabled && !self.args.no_comment {
            self.post_comment(&client, &target, &config, &results, &output, out)?;
        }

        Ok(exit_status(&results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrGuardError;
    use crate::report::OutputFormat;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn options(root: &std::path::Path) -> GlobalOptions {
        GlobalOptions {
            project_root: root.to_path_buf(),
            config: None,
            format: OutputFormat::Human,
            no_color: true,
        }
    }

    fn args(server: &MockServer) -> PrArgs {
        PrArgs {
            pr_url: "https://github.com/acme/widgets/pull/7".to_string(),
            details_url: None,
            token: Some("secret".to_string()),
            api_url: server.base_url(),
            timeout: Some(30),
            no_comment: false,
        }
    }

    fn mock_pr<'a>(server: &'a MockServer, title: &str) -> httpmock::Mock<'a> {
        let commits_url = server.url("/repos/acme/widgets/pulls/7/commits");
        let comments_url = server.url("/repos/acme/widgets/issues/7/comments");
        let title = title.to_string();
        server.mock(move |when, then| {
            when.method(GET)
                .path("/repos/acme/widgets/pulls/7")
                .header("authorization", "Bearer secret");
            then.status(200).json_body(json!({
                "number": 7,
                "title": title,
                "body": "- [x] tests",
                "head": {"ref": "feature/login"},
                "commits_url": commits_url,
                "comments_url": comments_url
            }));
        })
    }

    fn write_config(dir: &TempDir, yaml: &str) {
        fs::write(dir.path().join(".prguard.yml"), yaml).unwrap();
    }

    #[test]
    fn passing_pr_posts_a_comment() {
        let server = MockServer::start();
        let pr = mock_pr(&server, "Add login");
        let comment = server.mock(|when, then| {
            when.method(POST).path("/repos/acme/widgets/issues/7/comments");
            then.status(201)
                .json_body(json!({"id": 11, "body": "x", "html_url": "https://github.com/c/11"}));
        });
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "checks:\n  branch_name:\n    pattern: '^feature/'\n  pr_title: ~\n  pr_body_checklist: ~\n",
        );

        let mut out = Vec::new();
        let result = PrCommand::new(options(temp.path()), args(&server))
            .execute(&mut out)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(result, CommandResult::success());
        assert!(out.contains("Checking acme/widgets#7"));
        assert!(out.contains("Pull request comment created at: https://github.com/c/11"));
        pr.assert_calls(1);
        comment.assert();
    }

    #[test]
    fn failing_check_exits_one_and_comment_error_is_swallowed() {
        let server = MockServer::start();
        mock_pr(&server, "add login");
        server.mock(|when, then| {
            when.method(POST).path("/repos/acme/widgets/issues/7/comments");
            then.status(403);
        });
        let temp = TempDir::new().unwrap();
        write_config(&temp, "checks:\n  pr_title: ~\n");

        let mut out = Vec::new();
        let result = PrCommand::new(options(temp.path()), args(&server))
            .execute(&mut out)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(out.contains("Error while creating comment:"));
        assert!(out.contains("HTTP 403"));
    }

    #[test]
    fn delete_previous_removes_older_reports() {
        let server = MockServer::start();
        mock_pr(&server, "Add login");
        server.mock(|when, then| {
            when.method(POST).path("/repos/acme/widgets/issues/7/comments");
            then.status(201)
                .json_body(json!({"id": 12, "body": "x", "html_url": "https://github.com/c/12"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/acme/widgets/issues/7/comments");
            then.status(200).json_body(json!([
                {"id": 3, "body": "# Pull Request Health Check\nold", "html_url": "u3"},
                {"id": 4, "body": "LGTM", "html_url": "u4"},
                {"id": 12, "body": "# Pull Request Health Check\nnew", "html_url": "u12"}
            ]));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/repos/acme/widgets/issues/comments/3");
            then.status(204);
        });
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "settings:\n  pr_comment_report:\n    delete_previous: true\nchecks:\n  pr_title: ~\n",
        );

        let mut out = Vec::new();
        PrCommand::new(options(temp.path()), args(&server))
            .execute(&mut out)
            .unwrap();

        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Deleted 1 previous report comment(s)"));
        delete.assert();
    }

    #[test]
    fn disabled_comments_make_no_post() {
        let server = MockServer::start();
        mock_pr(&server, "Add login");
        let comment = server.mock(|when, then| {
            when.method(POST).path("/repos/acme/widgets/issues/7/comments");
            then.status(201);
        });
        let temp = TempDir::new().unwrap();
        write_config(
            &temp,
            "settings:\n  pr_comment_report:\n    enabled: false\nchecks:\n  pr_title: ~\n",
        );

        let mut out = Vec::new();
        PrCommand::new(options(temp.path()), args(&server))
            .execute(&mut out)
            .unwrap();

        comment.assert_calls(0);
    }

    #[test]
    fn bad_pr_url_is_an_error() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        write_config(&temp, "checks: {}\n");
        let mut bad = args(&server);
        bad.pr_url = "https://github.com/acme".to_string();

        let err = PrCommand::new(options(temp.path()), bad)
            .execute(&mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, PrGuardError::InvalidPullRequestUrl { .. }));
    }

    #[test]
    fn missing_config_is_an_error() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();

        let err = PrCommand::new(options(temp.path()), args(&server))
            .execute(&mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, PrGuardError::ConfigNotFound { .. }));
    }
}
