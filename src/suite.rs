//! Check suite execution.
//!
//! A [`CheckSuite`] runs every configured check once, in configuration
//! order, and always produces exactly one result per check type:
//!
//! - Invalid check config: error result, `invalid_config`
//! - Check type not registered: error result, `unknown_check_type`
//! - No content provider: error result, `missing_content_provider`
//! - Content fetch failed: error result, `content_unavailable`
//! - Check panicked: error result, `unexpected_error`
//!
//! One bad check never stops the others.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use serde_json::{Map, Value};

use crate::checks::CheckRegistry;
use crate::config::{CheckConfig, FailureLevel};
use crate::content::{ContentProviderFactory, FetchContext};
use crate::results::{
    CheckResult, CheckSuiteResults, ERROR_CONTENT_UNAVAILABLE, ERROR_INVALID_CONFIG,
    ERROR_MISSING_CONTENT_PROVIDER, ERROR_UNEXPECTED, ERROR_UNKNOWN_CHECK_TYPE,
};

/// A configured check, or the reason its config was rejected.
#[derive(Debug, Clone)]
enum Entry {
    Ready(CheckConfig),
    Invalid { config: CheckConfig, message: String },
}

impl Entry {
    fn config(&self) -> &CheckConfig {
        match self {
            Entry::Ready(config) | Entry::Invalid { config, .. } => config,
        }
    }
}

/// Runs a set of configured checks against content from a provider factory.
pub struct CheckSuite<'a> {
    entries: Vec<Entry>,
    registry: &'a CheckRegistry,
    providers: &'a ContentProviderFactory,
    deadline: Option<Instant>,
}

impl<'a> CheckSuite<'a> {
    /// Create a suite from the raw `checks:` mapping.
    ///
    /// Entries whose options cannot be turned into a [`CheckConfig`] are
    /// kept and reported as `invalid_config` when the suite runs.
    pub fn new(
        checks: &Map<String, Value>,
        registry: &'a CheckRegistry,
        providers: &'a ContentProviderFactory,
    ) -> Self {
        let mut suite = Self::empty(registry, providers);
        for (check_type, options) in checks {
            let entry = match CheckConfig::build(check_type, options) {
                Ok(config) => Entry::Ready(config),
                Err(err) => Entry::Invalid {
                    config: CheckConfig::new(check_type.as_str(), FailureLevel::Error, Map::new()),
                    message: err.to_string(),
                },
            };
            suite.push(entry);
        }
        suite
    }

    /// Create a suite from already built configs.
    pub fn from_configs(
        configs: impl IntoIterator<Item = CheckConfig>,
        registry: &'a CheckRegistry,
        providers: &'a ContentProviderFactory,
    ) -> Self {
        let mut suite = Self::empty(registry, providers);
        for config in configs {
            suite.push(Entry::Ready(config));
        }
        suite
    }

    /// Stop starting content fetches once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The configured check types, in run order.
    pub fn check_types(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.config().check_type.as_str())
            .collect()
    }

    /// Number of configured checks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no check is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every check, in order.
    pub fn run(&self) -> CheckSuiteResults {
        let ctx = match self.deadline {
            Some(deadline) => FetchContext::with_deadline(deadline),
            None => FetchContext::new(),
        };

        let mut results = CheckSuiteResults::new();
        for entry in &self.entries {
            let result = self.run_entry(entry, &ctx);
            tracing::debug!("{}", result);
            results.add(result);
        }
        results
    }

    fn empty(registry: &'a CheckRegistry, providers: &'a ContentProviderFactory) -> Self {
        Self {
            entries: Vec::new(),
            registry,
            providers,
            deadline: None,
        }
    }

    /// Add an entry; a repeated check type replaces the earlier entry in
    /// place.
    fn push(&mut self, entry: Entry) {
        let check_type = &entry.config().check_type;
        match self
            .entries
            .iter_mut()
            .find(|existing| &existing.config().check_type == check_type)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    fn run_entry(&self, entry: &Entry, ctx: &FetchContext) -> CheckResult {
        let config = match entry {
            Entry::Ready(config) => config,
            Entry::Invalid { config, message } => {
                return CheckResult::error(config, ERROR_INVALID_CONFIG, message.clone())
            }
        };
        tracing::debug!("Running check '{}'", config.check_type);

        let Some(check) = self.registry.create(config) else {
            return CheckResult::error(
                config,
                ERROR_UNKNOWN_CHECK_TYPE,
                format!("Unknown check type \"{}\"", config.check_type),
            );
        };

        let Some(provider) = self.providers.create(&config.check_type) else {
            return CheckResult::error(
                config,
                ERROR_MISSING_CONTENT_PROVIDER,
                format!(
                    "No content provider registered for check type \"{}\"",
                    config.check_type
                ),
            );
        };

        let content = match provider.get_content(ctx) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    "Content provider '{}' failed for '{}': {}",
                    provider.name(),
                    config.check_type,
                    err
                );
                return CheckResult::error(
                    config,
                    ERROR_CONTENT_UNAVAILABLE,
                    format!("Could not fetch content: {}", err),
                )
                .with_detail("provider", provider.name());
            }
        };

        match catch_unwind(AssertUnwindSafe(|| check.run(&content))) {
            Ok(result) => result,
            Err(panic) => CheckResult::error(
                config,
                ERROR_UNEXPECTED,
                format!("Check panicked: {}", panic_message(panic.as_ref())),
            ),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
