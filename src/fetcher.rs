//! Cached metadata fetcher.
//!
//! `Fetcher` ties the pieces together: it validates the requested URL,
//! serves the parsed document from the cache or retrieves it (caching
//! failures too), and runs the requested extractor over the tree. The
//! extraction result itself is never cached, only the document.

use std::sync::Arc;

use crate::cache::DocumentCache;
use crate::document::ParsedDocument;
use crate::error::{Error, Result};
use crate::metadata::{
    extract_description, extract_favicons, extract_links, extract_title, LinkCategory,
};
use crate::options::FetcherOptions;
use crate::retriever::{HttpRetriever, Retriever};
use crate::url_utils::validate_url;

/// Fetches pages once and mines them for metadata.
///
/// A single `Fetcher` can be shared between threads (for example behind an
/// `Arc`); all callers go through the same document cache.
///
/// # Example
///
/// ```no_run
/// use katsuragi::{Fetcher, FetcherOptions, LinkCategory};
///
/// let fetcher = Fetcher::new(&FetcherOptions::default())?;
/// let title = fetcher.title("https://example.com")?;
/// let external = fetcher.links("https://example.com", LinkCategory::External)?;
/// println!("{title}: {} external links", external.len());
/// # Ok::<(), katsuragi::Error>(())
/// ```
pub struct Fetcher {
    cache: DocumentCache,
    retriever: Arc<dyn Retriever>,
}

impl Fetcher {
    /// Create a fetcher that retrieves pages over HTTP.
    pub fn new(options: &FetcherOptions) -> Result<Self> {
        let retriever = HttpRetriever::new(options)?;
        Ok(Self::with_retriever(options, retriever))
    }

    /// Create a fetcher around a custom [`Retriever`].
    #[must_use]
    pub fn with_retriever<R>(options: &FetcherOptions, retriever: R) -> Self
    where
        R: Retriever + 'static,
    {
        Self {
            cache: DocumentCache::new(options.capacity()),
            retriever: Arc::new(retriever),
        }
    }

    /// The parsed document for `url`, from cache when possible.
    ///
    /// Retrieval failures are cached against the URL and returned unchanged
    /// on later calls until the entry is evicted or the cache is cleared.
    pub fn retrieve(&self, url: &str) -> Result<Arc<ParsedDocument>> {
        if !validate_url(url) {
            return Err(Error::Validation(url.to_string()));
        }

        if let Some(outcome) = self.cache.get(url) {
            return outcome;
        }
        tracing::debug!(url, "document cache miss");

        let outcome = self.retriever.retrieve(url).map(Arc::new);
        if let Err(err) = &outcome {
            tracing::warn!(url, error = %err, "caching retrieval failure");
        }
        self.cache.put(url, outcome.clone());
        outcome
    }

    /// Page title. See [`extract_title`] for the rules.
    pub fn title(&self, url: &str) -> Result<String> {
        let doc = self.retrieve(url)?;
        extract_title(&doc).ok_or(Error::NotFound("title"))
    }

    /// Page description. See [`extract_description`] for the rules.
    pub fn description(&self, url: &str) -> Result<String> {
        let doc = self.retrieve(url)?;
        extract_description(&doc).ok_or(Error::NotFound("description"))
    }

    /// Favicon URLs, falling back to probing `/favicon.ico`.
    pub fn favicons(&self, url: &str) -> Result<Vec<String>> {
        let doc = self.retrieve(url)?;
        extract_favicons(&doc, url, |candidate| self.retriever.probe(candidate))
            .ok_or(Error::NotFound("favicons"))
    }

    /// Links of the given category. See [`extract_links`] for the rules.
    pub fn links(&self, url: &str, category: LinkCategory) -> Result<Vec<String>> {
        let doc = self.retrieve(url)?;
        extract_links(&doc, url, category).ok_or(Error::NotFound("links"))
    }

    /// Forget every cached document and failure.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The underlying document cache.
    #[must_use]
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
