//! Local git repository access.
//!
//! Shells out to the `git` binary; nothing is written to the repository.

pub mod providers;

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PrGuardError, Result};

pub use providers::{
    local_providers, LocalBranchProvider, LocalCommitsProvider, LOCAL_BRANCH, LOCAL_COMMITS,
};

/// Most commits read from a branch.
pub const MAX_COMMITS: usize = 50;

// Separators emitted by the `--format` string in `GitRepo::commits`.
const RECORD_SEPARATOR: char = '\u{1e}';
const FIELD_SEPARATOR: char = '\u{1f}';

/// A commit read from the local repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCommit {
    pub sha: String,
    pub message: String,
    pub additions: u64,
    pub deletions: u64,
}

impl LocalCommit {
    /// Changed lines, additions plus deletions.
    pub fn total(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// A working copy on disk.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The checked out branch, or `None` on a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let output = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let branch = output.trim();
        if branch.is_empty() || branch == "HEAD" {
            return Ok(None);
        }
        Ok(Some(branch.to_string()))
    }

    /// Commits of the current branch, newest first, at most `max`.
    ///
    /// With a base ref, these are the commits reachable from HEAD but not
    /// from the base. Without one, only the tip commit is returned.
    pub fn commits(&self, base: Option<&str>, max: usize) -> Result<Vec<LocalCommit>> {
        let range = match base {
            Some(base) if base.starts_with('-') => {
                return Err(PrGuardError::GitCommand {
                    command: "log".to_string(),
                    message: format!("invalid base ref '{}'", base),
                });
            }
            Some(base) => format!("{}..HEAD", base),
            None => "HEAD".to_string(),
        };
        let limit = match base {
            Some(_) => max,
            None => 1,
        };
        let max_count = format!("--max-count={}", limit);

        let output = self.run(&[
            "log",
            "--no-color",
            "--numstat",
            "--format=%x1e%H%x1f%B%x1f",
            &max_count,
            &range,
        ])?;
        Ok(parse_log(&output))
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("Running git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| PrGuardError::GitCommand {
                command: args.join(" "),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PrGuardError::GitCommand {
                command: args.join(" "),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse `git log --numstat` output split by the record and field separators.
fn parse_log(output: &str) -> Vec<LocalCommit> {
    output
        .split(RECORD_SEPARATOR)
        .filter_map(|record| {
            let mut fields = record.splitn(3, FIELD_SEPARATOR);
            let sha = fields.next()?.trim();
            if sha.is_empty() {
                return None;
            }
            let message = fields.next().unwrap_or_default().trim_end().to_string();
            let (additions, deletions) = fields
                .next()
                .unwrap_or_default()
                .lines()
                .filter_map(parse_numstat)
                .fold((0, 0), |(a, d), (add, del)| (a + add, d + del));

            Some(LocalCommit {
                sha: sha.to_string(),
                message,
                additions,
                deletions,
            })
        })
        .collect()
}

/// One `added<TAB>deleted<TAB>path` line. Binary files (`-`) count as zero.
fn parse_numstat(line: &str) -> Option<(u64, u64)> {
    let mut parts = line.split('\t');
    let added = parts.next()?;
    let deleted = parts.next()?;
    parts.next()?;
    Some((added.parse().unwrap_or(0), deleted.parse().unwrap_or(0)))
}
