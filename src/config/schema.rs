//! Configuration schema definitions for prguard.
//!
//! This module contains the struct definitions that map to the YAML (or
//! JSON) configuration file format.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A bare `key:` in YAML is null; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root configuration structure for `.prguard.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Global settings
    #[serde(deserialize_with = "null_as_default")]
    pub settings: Settings,

    /// Check type → raw options, in configuration order.
    ///
    /// Options stay untyped here; each entry becomes a
    /// [`CheckConfig`](super::CheckConfig) when the suite is built.
    #[serde(deserialize_with = "null_as_default")]
    pub checks: Map<String, Value>,
}

impl GuardConfig {
    /// The configured check types, in run order.
    pub fn check_types(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }
}

/// Global settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pull request comment report
    #[serde(deserialize_with = "null_as_default")]
    pub pr_comment_report: PrCommentSettings,
}

/// Settings of the summary comment posted on the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrCommentSettings {
    /// Post a comment at all
    pub enabled: bool,

    /// Delete earlier report comments once the new one is posted
    pub delete_previous: bool,

    /// Show each result's message
    pub show_message: bool,

    /// Show each result's remaining details
    pub show_details: bool,

    /// Render sections that have no entries
    pub show_empty_sections: bool,

    /// Render the successful checks section
    pub show_successful: bool,
}

impl Default for PrCommentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delete_previous: false,
            show_message: true,
            show_details: false,
            show_empty_sections: false,
            show_successful: true,
        }
    }
}
