//! Error types for katsuragi.
//!
//! `Fetch` and `Parse` failures are stored in the document cache and handed
//! back on later hits, so every variant is cheap to clone and comparable.

/// Error type for fetch and extraction operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The URL passed to an extraction call is not syntactically valid.
    #[error("invalid URL: {0}")]
    Validation(String),

    /// Retrieving the page failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response body could not be turned into a document tree.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// The document was retrieved but holds no qualifying content.
    #[error("no {0} found in document")]
    NotFound(&'static str),

    /// The hostname has no resolvable public suffix.
    #[error("cannot resolve registrable domain: {0}")]
    Domain(String),
}

/// Sub-kinds of a failed page retrieval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection could not be established.
    #[error("host unreachable: {0}")]
    Unreachable(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    /// The server answered with something other than HTML.
    #[error("unexpected content type: {0}")]
    ContentType(String),

    /// Any other transport failure (bad request, body read error, ...).
    #[error("request failed: {0}")]
    Request(String),
}

/// Result type alias for katsuragi operations.
pub type Result<T> = std::result::Result<T, Error>;
