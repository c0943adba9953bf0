//! Per-check configuration.
//!
//! A [`CheckConfig`] is built from one entry of the `checks:` mapping. The
//! reserved `failure_level` key is popped out; every other key is kept as a
//! check-specific option and interpreted by the check itself when it runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PrGuardError, Result};

/// Reserved option key selecting the [`FailureLevel`].
pub const FAILURE_LEVEL_KEY: &str = "failure_level";

/// How a failed check affects the overall outcome of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureLevel {
    /// A failure is reported but does not fail the run.
    Warning,
    /// A failure fails the run.
    #[default]
    Error,
}

impl fmt::Display for FailureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureLevel::Warning => write!(f, "warning"),
            FailureLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for FailureLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warning" => Ok(FailureLevel::Warning),
            "error" => Ok(FailureLevel::Error),
            other => Err(format!(
                "unknown failure level \"{}\" (expected \"warning\" or \"error\")",
                other
            )),
        }
    }
}

/// Why a check option could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// The option is absent, null, or an empty string/list.
    Missing(String),
    /// The option is present but has the wrong shape.
    Invalid { name: String, expected: &'static str },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::Missing(name) => write!(f, "option \"{}\" not defined or empty", name),
            OptionError::Invalid { name, expected } => {
                write!(f, "option \"{}\" must be {}", name, expected)
            }
        }
    }
}

/// The configuration of a single check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckConfig {
    /// The check type this configuration selects, e.g. `branch_name`.
    pub check_type: String,
    /// How a failure of this check is treated.
    pub failure_level: FailureLevel,
    /// Check-specific options, in configuration order.
    pub options: Map<String, Value>,
}

impl CheckConfig {
    /// Create a config directly from its parts.
    pub fn new(
        check_type: impl Into<String>,
        failure_level: FailureLevel,
        options: Map<String, Value>,
    ) -> Self {
        Self {
            check_type: check_type.into(),
            failure_level,
            options,
        }
    }

    /// Build a config from the raw options of one `checks:` entry.
    ///
    /// `null` is accepted as "no options". Anything other than a mapping or
    /// null, and any `failure_level` other than `warning`/`error`, is rejected.
    /// Required options are not validated here; checks do that when they run.
    pub fn build(check_type: &str, raw_options: &Value) -> Result<Self> {
        let mut options = match raw_options {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            other => {
                return Err(PrGuardError::InvalidCheckConfig {
                    check_type: check_type.to_string(),
                    message: format!("expected a mapping of options, found {}", kind_of(other)),
                })
            }
        };

        let failure_level = match options.shift_remove(FAILURE_LEVEL_KEY) {
            None | Some(Value::Null) => FailureLevel::default(),
            Some(Value::String(level)) => level.parse::<FailureLevel>().map_err(|message| {
                PrGuardError::InvalidCheckConfig {
                    check_type: check_type.to_string(),
                    message,
                }
            })?,
            Some(other) => {
                return Err(PrGuardError::InvalidCheckConfig {
                    check_type: check_type.to_string(),
                    message: format!("failure_level must be a string, found {}", kind_of(&other)),
                })
            }
        };

        Ok(Self::new(check_type, failure_level, options))
    }

    /// Raw access to an option.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name).filter(|v| !v.is_null())
    }

    /// A required, non-empty string option.
    pub fn option_str(&self, name: &str) -> std::result::Result<&str, OptionError> {
        match self.option(name) {
            None => Err(OptionError::Missing(name.to_string())),
            Some(Value::String(s)) if s.is_empty() => Err(OptionError::Missing(name.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(OptionError::Invalid {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }

    /// An optional non-negative integer option.
    ///
    /// Absent or null gives `Ok(None)`.
    pub fn option_usize(&self, name: &str) -> std::result::Result<Option<usize>, OptionError> {
        match self.option(name) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or(OptionError::Invalid {
                    name: name.to_string(),
                    expected: "a non-negative integer",
                }),
        }
    }

    /// A required, non-empty list of strings. A single string counts as a
    /// one-element list.
    pub fn option_str_list(&self, name: &str) -> std::result::Result<Vec<String>, OptionError> {
        let invalid = || OptionError::Invalid {
            name: name.to_string(),
            expected: "a list of strings",
        };

        let list: Vec<String> = match self.option(name) {
            None => return Err(OptionError::Missing(name.to_string())),
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(String::from).ok_or_else(invalid))
                .collect::<std::result::Result<_, _>>()?,
            Some(_) => return Err(invalid()),
        };

        let list: Vec<String> = list.into_iter().filter(|s| !s.is_empty()).collect();
        if list.is_empty() {
            return Err(OptionError::Missing(name.to_string()));
        }
        Ok(list)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
