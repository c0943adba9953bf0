//! Check type to content provider mapping.
//!
//! The [`ContentProviderFactory`] stores named provider constructors and the
//! check types assigned to each name. Providers are built lazily and cached
//! per name, so every check type assigned to the same provider shares one
//! [`CachedProvider`] and therefore one fetch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{CachedProvider, ContentProvider};

/// Builds a fresh provider instance.
pub type ProviderConstructor = Box<dyn Fn() -> Box<dyn ContentProvider> + Send + Sync>;

/// Registry of content providers for one target (a PR, a local repository).
pub struct ContentProviderFactory {
    constructors: HashMap<String, ProviderConstructor>,
    assignments: HashMap<String, String>,
    instances: Mutex<HashMap<String, Arc<CachedProvider>>>,
}

impl ContentProviderFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
            assignments: HashMap::new(),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Register a named provider constructor.
    ///
    /// Replacing a constructor drops any instance already built under the
    /// same name.
    pub fn register_provider<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn ContentProvider> + Send + Sync + 'static,
    {
        let name = name.into();
        self.instances
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);
        self.constructors.insert(name, Box::new(constructor));
    }

    /// Assign a check type to a named provider.
    pub fn assign(&mut self, check_type: impl Into<String>, provider: impl Into<String>) {
        self.assignments.insert(check_type.into(), provider.into());
    }

    /// Register a provider and assign a check type to it in one step.
    pub fn register<F>(
        &mut self,
        check_type: impl Into<String>,
        provider: impl Into<String>,
        constructor: F,
    ) where
        F: Fn() -> Box<dyn ContentProvider> + Send + Sync + 'static,
    {
        let provider = provider.into();
        self.register_provider(provider.clone(), constructor);
        self.assign(check_type, provider);
    }

    /// The provider name assigned to a check type.
    pub fn provider_for(&self, check_type: &str) -> Option<&str> {
        self.assignments.get(check_type).map(String::as_str)
    }

    /// Check types with an assigned provider, sorted.
    pub fn check_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.assignments.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Get the provider for a check type.
    ///
    /// Returns `None` if no provider is assigned, or the assigned name has no
    /// constructor.
    pub fn create(&self, check_type: &str) -> Option<Arc<CachedProvider>> {
        let name = self.assignments.get(check_type)?;
        let constructor = self.constructors.get(name)?;

        let mut instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let provider = instances
            .entry(name.clone())
            .or_insert_with(|| Arc::new(CachedProvider::new(constructor())));
        Some(Arc::clone(provider))
    }
}

impl Default for ContentProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}
