//! URL Utility Functions
//!
//! Validation, relative-reference resolution and same-site classification.
//! Classification compares registrable domains (public suffix plus one
//! label), so `www.example.com` and `blog.example.com` are both internal to
//! `example.com` while `example.co.uk` and `other.co.uk` are different sites.

use url::{Host, Url};

use crate::error::{Error, Result};

/// Check whether a string parses as a URL under the generic syntax.
///
/// This says nothing about reachability.
#[must_use]
pub fn validate_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

fn is_data_uri(s: &str) -> bool {
    s.trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Resolve `href` against `base` using standard relative-reference rules.
///
/// Data URIs and hrefs that are already absolute come back unchanged. If
/// either input fails to parse, `href` is returned unchanged as well:
/// malformed hrefs are common and must not abort a whole extraction.
///
/// # Example
///
/// ```rust
/// use katsuragi::url_utils::resolve_absolute;
///
/// assert_eq!(
///     resolve_absolute("/favicon.ico", "http://example.com/page"),
///     "http://example.com/favicon.ico"
/// );
/// assert_eq!(resolve_absolute("../b", "http://example.com/x/y/z"), "http://example.com/x/b");
/// ```
#[must_use]
pub fn resolve_absolute(href: &str, base: &str) -> String {
    if is_data_uri(href) || Url::parse(href).is_ok() {
        return href.to_string();
    }

    Url::parse(base)
        .and_then(|base| base.join(href))
        .map_or_else(|_| href.to_string(), |resolved| resolved.to_string())
}

/// `scheme://host[:port]` of an absolute URL with a host.
#[must_use]
pub fn site_root(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str()?;
    Some(parsed.origin().ascii_serialization())
}

/// Anchor a favicon href at the page's site root.
///
/// Relative hrefs get `scheme://host` prefixed, with a `/` inserted when the
/// href is not already path-rooted. Absolute, protocol-relative and data
/// hrefs are handled by [`resolve_absolute`].
#[must_use]
pub fn anchor_to_site_root(href: &str, page_url: &str) -> String {
    if is_data_uri(href) || Url::parse(href).is_ok() || href.starts_with("//") {
        return resolve_absolute(href, page_url);
    }

    match site_root(page_url) {
        Some(root) if href.starts_with('/') => format!("{root}{href}"),
        Some(root) => format!("{root}/{href}"),
        None => href.to_string(),
    }
}

/// Conventional `/favicon.ico` location for a page's site.
#[must_use]
pub fn favicon_ico_url(page_url: &str) -> Option<String> {
    site_root(page_url).map(|root| format!("{root}/favicon.ico"))
}

/// A hostname split around its public suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    /// Effective top-level domain, e.g. `com` or `co.uk`.
    pub tld: String,
    /// The label immediately left of the TLD.
    pub root: String,
    /// Everything further left, empty when the host is exactly `root.tld`.
    pub subdomain: String,
}

impl DomainParts {
    /// The registrable domain (`root.tld`).
    #[must_use]
    pub fn registrable(&self) -> String {
        format!("{}.{}", self.root, self.tld)
    }
}

/// Split a URL's host into subdomain, root and public suffix.
///
/// Fails with [`Error::Validation`] if the URL does not parse and with
/// [`Error::Domain`] if the host is missing, is an IP address, or has no
/// known public suffix.
pub fn domain_parts(url: &str) -> Result<DomainParts> {
    let parsed = Url::parse(url).map_err(|e| Error::Validation(format!("{url}: {e}")))?;

    let host = match parsed.host() {
        Some(Host::Domain(host)) => host.trim_end_matches('.').to_ascii_lowercase(),
        Some(_) => return Err(Error::Domain(format!("{url}: IP address has no domain"))),
        None => return Err(Error::Domain(format!("{url}: no host"))),
    };

    let suffix_len = match psl::suffix(host.as_bytes()) {
        Some(suffix) if suffix.is_known() => suffix.as_bytes().len(),
        _ => return Err(Error::Domain(format!("{host}: unknown public suffix"))),
    };

    // Host must have at least one label in front of the suffix.
    if host.len() <= suffix_len + 1 {
        return Err(Error::Domain(format!("{host}: host is a public suffix")));
    }

    let tld = &host[host.len() - suffix_len..];
    let rest = &host[..host.len() - suffix_len - 1];
    let (subdomain, root) = match rest.rsplit_once('.') {
        Some((subdomain, root)) => (subdomain, root),
        None => ("", rest),
    };

    Ok(DomainParts {
        tld: tld.to_string(),
        root: root.to_string(),
        subdomain: subdomain.to_string(),
    })
}

/// Decide whether `candidate` belongs to the same site as `base`.
///
/// Internal means either the candidate string contains the whole base URL,
/// or both hosts share a registrable domain. Hosts without a public suffix
/// (IP literals, `localhost`) are compared verbatim instead. A candidate
/// without any host cannot be classified and yields [`Error::Domain`].
pub fn is_internal(candidate: &str, base: &str) -> Result<bool> {
    if !base.is_empty() && candidate.contains(base) {
        return Ok(true);
    }

    match (domain_parts(candidate), domain_parts(base)) {
        (Ok(c), Ok(b)) => Ok(c.registrable() == b.registrable()),
        (Err(Error::Validation(msg)), _) => Err(Error::Validation(msg)),
        _ => {
            let host = |url: &str| {
                Url::parse(url)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            };
            match (host(candidate), host(base)) {
                (Some(c), Some(b)) => Ok(c.trim_end_matches('.') == b.trim_end_matches('.')),
                _ => Err(Error::Domain(format!("{candidate}: cannot classify"))),
            }
        }
    }
}
