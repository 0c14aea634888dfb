//! Configuration options for the fetcher and its document cache.
//!
//! The `FetcherOptions` struct controls how pages are retrieved and how many
//! parsed documents are kept around between calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default number of documents kept in the cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Configuration options for a [`Fetcher`](crate::Fetcher).
///
/// All fields are public for easy configuration. Zero values are not
/// errors: they fall back to the defaults when read through the accessor
/// methods.
///
/// # Example
///
/// ```rust
/// use katsuragi::FetcherOptions;
///
/// let options = FetcherOptions {
///     cache_capacity: 64,
///     user_agent: "katsuragi-bot/0.1".to_string(),
///     ..FetcherOptions::default()
/// };
/// assert_eq!(options.timeout().as_millis(), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherOptions {
    /// Per-request timeout in milliseconds.
    ///
    /// Default: `3000`
    pub timeout_ms: u64,

    /// Maximum number of documents (or cached failures) held at once.
    ///
    /// Default: `10`
    pub cache_capacity: usize,

    /// `User-Agent` header sent with every request.
    ///
    /// Empty means the HTTP client's own default is used.
    ///
    /// Default: `""`
    pub user_agent: String,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            user_agent: String::new(),
        }
    }
}

impl FetcherOptions {
    /// Effective request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis())
    }

    /// Effective request timeout in milliseconds.
    #[must_use]
    pub fn timeout_millis(&self) -> u64 {
        if self.timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            self.timeout_ms
        }
    }

    /// Effective cache capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        if self.cache_capacity == 0 {
            DEFAULT_CACHE_CAPACITY
        } else {
            self.cache_capacity
        }
    }

    /// User agent to send, if one was configured.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        let agent = self.user_agent.trim();
        if agent.is_empty() {
            None
        } else {
            Some(agent)
        }
    }
}
