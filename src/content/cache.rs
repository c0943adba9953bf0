//! Fetch-once wrapper around content providers.

use std::sync::{Arc, Mutex, PoisonError};

use super::{Content, ContentProvider, FetchContext};
use crate::error::Result;

/// A content provider with a memoized fetch.
///
/// The first successful [`get_content`](CachedProvider::get_content) call
/// performs the retrieval; later calls return the stored content. Failures
/// are not stored, so a later call retries. The lock is held across the
/// fill, so concurrent callers never trigger a second retrieval.
pub struct CachedProvider {
    inner: Box<dyn ContentProvider>,
    slot: Mutex<Option<Arc<Content>>>,
}

impl CachedProvider {
    /// Wrap a provider.
    pub fn new(inner: Box<dyn ContentProvider>) -> Self {
        Self {
            inner,
            slot: Mutex::new(None),
        }
    }

    /// Name of the wrapped provider.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Return the content, fetching it on first use.
    pub fn get_content(&self, ctx: &FetchContext) -> Result<Arc<Content>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(content) = slot.as_ref() {
            tracing::debug!("Using cached content from provider '{}'", self.name());
            return Ok(Arc::clone(content));
        }

        ctx.ensure_time_left()?;
        tracing::debug!("Fetching content with provider '{}'", self.name());
        let content = Arc::new(self.inner.fetch_content(ctx)?);
        *slot = Some(Arc::clone(&content));
        Ok(content)
    }

    /// Whether content has been fetched successfully.
    pub fn is_cached(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for CachedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedProvider")
            .field("name", &self.name())
            .field("cached", &self.is_cached())
            .finish()
    }
}
