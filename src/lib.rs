//! # katsuragi
//!
//! Fetch a web page once, keep its parsed tree in a bounded LRU cache, and
//! mine it repeatedly for metadata: title, description, favicons and links.
//!
//! ## Quick Start
//!
//! ```no_run
//! use katsuragi::{Fetcher, FetcherOptions, LinkCategory};
//!
//! let fetcher = Fetcher::new(&FetcherOptions {
//!     user_agent: "katsuragi/0.1".to_string(),
//!     ..FetcherOptions::default()
//! })?;
//!
//! let url = "https://example.com";
//! println!("Title: {}", fetcher.title(url)?);
//! println!("Icons: {:?}", fetcher.favicons(url)?);
//! println!("Internal links: {:?}", fetcher.links(url, LinkCategory::Internal)?);
//! # Ok::<(), katsuragi::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Document cache**: thread-safe LRU keyed by URL that also remembers
//!   failures, so broken URLs are not fetched over and over
//! - **Title / description**: `<title>`, Open Graph and Twitter meta tags,
//!   first match in document order wins
//! - **Favicons**: icon links plus square `og:image`s, with a
//!   `/favicon.ico` fallback probe
//! - **Links**: all, internal or external, classified by registrable domain
//!   using the public suffix list
//!
//! Markup that is already in hand can be mined without any network access:
//!
//! ```rust
//! use katsuragi::{extract_description, ParsedDocument};
//!
//! let doc = ParsedDocument::parse(
//!     r#"<html><head><meta name="description" content="Offline"></head></html>"#,
//! )?;
//! assert_eq!(extract_description(&doc).as_deref(), Some("Offline"));
//! # Ok::<(), katsuragi::Error>(())
//! ```

mod error;
mod fetcher;
mod options;

/// Immutable, thread-safe parsed document tree.
pub mod document;

/// LRU cache of parsed documents and retrieval failures.
pub mod cache;

/// Page retrieval over HTTP.
pub mod retriever;

/// Character encoding detection for response bodies.
pub mod encoding;

/// Title, description, favicon and link extractors.
pub mod metadata;

/// URL validation, resolution and same-site classification.
pub mod url_utils;

// Public API - re-exports
pub use cache::{CachedDocument, DocumentCache};
pub use document::{NodeId, NodeKind, ParsedDocument};
pub use error::{Error, FetchError, Result};
pub use fetcher::Fetcher;
pub use metadata::{
    collect_favicons, extract_description, extract_favicons, extract_links, extract_title,
    LinkCategory,
};
pub use options::{FetcherOptions, DEFAULT_CACHE_CAPACITY, DEFAULT_TIMEOUT_MS};
pub use retriever::{HttpRetriever, Retriever};
pub use url_utils::{domain_parts, is_internal, resolve_absolute, validate_url, DomainParts};
