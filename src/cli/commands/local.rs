//! Local command implementation.
//!
//! The `prguard local` command runs the branch and commit checks against
//! the checked out branch of a local repository. Details are only printed
//! when something needs attention.

use std::io::Write;
use std::path::PathBuf;

use crate::checks::CheckRegistry;
use crate::cli::args::LocalArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::git::{local_providers, GitRepo};
use crate::suite::CheckSuite;

use super::dispatcher::{Command, CommandResult, GlobalOptions};
use super::display::{exit_status, Details, SuiteOutput};

/// The local command implementation.
pub struct LocalCommand {
    options: GlobalOptions,
    args: LocalArgs,
}

impl LocalCommand {
    /// Create a new local command.
    pub fn new(options: GlobalOptions, args: LocalArgs) -> Self {
        Self { options, args }
    }

    /// The repository to check; also where the config is looked up.
    pub fn repo_root(&self) -> PathBuf {
        self.args
            .repo
            .clone()
            .unwrap_or_else(|| self.options.project_root.clone())
    }
}

impl Command for LocalCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let root = self.repo_root();
        let config = load_config(&root, self.options.config.as_deref())?;

        let providers = local_providers(GitRepo::new(&root), self.args.base.clone());
        let registry = CheckRegistry::with_builtins();
        let suite = CheckSuite::new(&config.checks, &registry, &providers);

        let target = match &self.args.base {
            Some(base) => format!("{} against {}", root.display(), base),
            None => root.display().to_string(),
        };
        let output = SuiteOutput::new(&self.options);
        let results = output.run(&suite, &target, Details::OnFailure, out)?;

        Ok(exit_status(&results))
    }
}
