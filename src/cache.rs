//! LRU Cache for Parsed Documents
//!
//! Bounded, thread-safe map from the exact requested URL string to either a
//! parsed document or the error that retrieving it produced. Failures are
//! cached the same way as successes, so a known-bad URL is not fetched again
//! until its entry is evicted or the cache is cleared.
//!
//! ## Locking
//!
//! The recency list lives in an `lru::LruCache` behind one mutex. Every
//! operation takes it, lookups included, because a hit reorders the list.
//! Critical sections are a hash lookup and an `Arc` clone.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::document::ParsedDocument;
use crate::error::Result;
use crate::options::DEFAULT_CACHE_CAPACITY;

/// Outcome stored for a URL: the document, or the failure to produce it.
pub type CachedDocument = Result<Arc<ParsedDocument>>;

/// Bounded LRU cache of retrieval outcomes keyed by URL.
pub struct DocumentCache {
    entries: Mutex<LruCache<String, CachedDocument>>,
}

impl DocumentCache {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero falls back to the default of 10.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a URL, promoting it to most recently used on a hit.
    ///
    /// `None` means the URL is not resident. `Some(Err(_))` is a cached
    /// failure, returned exactly as it was stored.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<CachedDocument> {
        let mut entries = self.entries.lock();
        let outcome = entries.get(url)?;
        tracing::debug!(url, cached_error = outcome.is_err(), "document cache hit");
        Some(outcome.clone())
    }

    /// Store a retrieval outcome for a URL.
    ///
    /// An existing entry is overwritten in place and promoted. A new key
    /// evicts the least recently used entry first when the cache is full.
    pub fn put(&self, url: &str, outcome: CachedDocument) {
        let mut entries = self.entries.lock();
        if let Some((evicted, _)) = entries.push(url.to_string(), outcome) {
            if evicted != url {
                tracing::debug!(url = %evicted, "evicting least recently used document");
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        tracing::debug!(entries = entries.len(), "clearing document cache");
        entries.clear();
    }

    /// True if the URL is resident. Does not affect recency.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.lock().contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("DocumentCache")
            .field("capacity", &entries.cap())
            .field("len", &entries.len())
            .finish_non_exhaustive()
    }
}
