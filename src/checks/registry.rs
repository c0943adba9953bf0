//! Check registry.
//!
//! The [`CheckRegistry`] maps check type identifiers to constructors. It is
//! populated once at startup and only read while a suite runs.

use std::collections::HashMap;

use super::check::{Check, CheckKind};
use crate::config::CheckConfig;

/// Builds a check bound to the given config.
pub type CheckConstructor = Box<dyn Fn(CheckConfig) -> Box<dyn Check> + Send + Sync>;

/// Registry of all available checks.
pub struct CheckRegistry {
    constructors: HashMap<String, CheckConstructor>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with all built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in CheckKind::ALL {
            registry.register(kind.as_str(), move |config| kind.build(config));
        }
        registry
    }

    /// Register a check type, replacing any existing constructor.
    pub fn register<F>(&mut self, check_type: impl Into<String>, constructor: F)
    where
        F: Fn(CheckConfig) -> Box<dyn Check> + Send + Sync + 'static,
    {
        self.constructors
            .insert(check_type.into(), Box::new(constructor));
    }

    /// Build the check for a config, or `None` if its type is unknown.
    pub fn create(&self, config: &CheckConfig) -> Option<Box<dyn Check>> {
        self.constructors
            .get(&config.check_type)
            .map(|constructor| constructor(config.clone()))
    }

    /// Whether a check type is registered.
    pub fn contains(&self, check_type: &str) -> bool {
        self.constructors.contains_key(check_type)
    }

    /// Registered check types, sorted.
    pub fn check_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Get the number of registered check types.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
