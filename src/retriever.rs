//! Page retrieval.
//!
//! [`Retriever`] is the boundary between the cache and the network: given a
//! URL it returns a parsed document or a typed error. It also carries the
//! secondary "does this resource exist" probe used by favicon extraction, so
//! both can be replaced in tests without a live network.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::document::ParsedDocument;
use crate::encoding::decode_html;
use crate::error::{Error, FetchError, Result};
use crate::options::FetcherOptions;

/// Source of parsed documents.
pub trait Retriever: Send + Sync {
    /// Fetch and parse the page at `url`.
    fn retrieve(&self, url: &str) -> Result<ParsedDocument>;

    /// True if `url` answers a GET with HTTP 200.
    fn probe(&self, url: &str) -> bool;
}

/// Media types accepted as HTML.
const HTML_MEDIA_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Media type of a `Content-Type` header value: lowercase, parameters dropped.
#[must_use]
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// [`Retriever`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpRetriever {
    client: Client,
    timeout_ms: u64,
}

impl HttpRetriever {
    /// Build a client with the configured timeout and user agent.
    pub fn new(options: &FetcherOptions) -> Result<Self> {
        let mut builder = Client::builder().timeout(options.timeout());
        if let Some(agent) = options.user_agent() {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Fetch(FetchError::Request(e.to_string())))?;

        Ok(Self {
            client,
            timeout_ms: options.timeout_millis(),
        })
    }

    fn classify(&self, err: &reqwest::Error) -> Error {
        let kind = if err.is_timeout() {
            FetchError::Timeout(self.timeout_ms)
        } else if err.is_connect() {
            FetchError::Unreachable(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        };
        Error::Fetch(kind)
    }
}

impl Retriever for HttpRetriever {
    fn retrieve(&self, url: &str) -> Result<ParsedDocument> {
        tracing::debug!(url, "fetching document");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()).into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let media = media_type(content_type.as_deref().unwrap_or_default());
        if !HTML_MEDIA_TYPES.contains(&media.as_str()) {
            return Err(FetchError::ContentType(media).into());
        }

        let body = response.bytes().map_err(|e| self.classify(&e))?;
        let html = decode_html(&body, content_type.as_deref());
        ParsedDocument::parse(&html)
    }

    fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send() {
            Ok(response) => {
                tracing::debug!(url, status = response.status().as_u16(), "probed resource");
                response.status() == StatusCode::OK
            }
            Err(err) => {
                tracing::debug!(url, error = %err, "probe failed");
                false
            }
        }
    }
}
