//! Outbound link collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::ParsedDocument;
use crate::error::Error;
use crate::url_utils::{is_internal, resolve_absolute, validate_url};

/// Which links to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    /// Every valid link.
    #[default]
    All,
    /// Links on the same registrable domain as the page.
    Internal,
    /// Links to other sites.
    External,
}

impl FromStr for LinkCategory {
    type Err = Error;

    /// Parse `"all"`, `"internal"` or `"external"` (any case). An empty
    /// string means [`LinkCategory::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            other => Err(Error::Validation(format!("unknown link category: {other}"))),
        }
    }
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Internal => "internal",
            Self::External => "external",
        })
    }
}

/// Links of the requested category, absolute and deduplicated, in document order.
///
/// Every `<a href>` in the document counts, not just those in `<head>`.
/// Hrefs that are still not valid URLs after resolution are skipped. A link
/// that cannot be classified (no host) is left out of `Internal` and
/// `External` but still belongs to `All`.
///
/// # Example
///
/// ```rust
/// use katsuragi::{extract_links, LinkCategory, ParsedDocument};
///
/// let doc = ParsedDocument::parse(
///     r#"<a href="http://sub.example.com/a">in</a><a href="http://external.org/a">out</a>"#,
/// )?;
/// let internal = extract_links(&doc, "http://example.com", LinkCategory::Internal);
/// assert_eq!(internal, Some(vec!["http://sub.example.com/a".to_string()]));
/// # Ok::<(), katsuragi::Error>(())
/// ```
#[must_use]
pub fn extract_links(
    doc: &ParsedDocument,
    page_url: &str,
    category: LinkCategory,
) -> Option<Vec<String>> {
    let mut links: Vec<String> = Vec::new();

    for id in doc.descendants() {
        let node = doc.node(id);
        if !node.is_element("a") {
            continue;
        }
        let Some(href) = node.attr("href") else {
            continue;
        };

        let absolute = resolve_absolute(href, page_url);
        if !validate_url(&absolute) || links.contains(&absolute) {
            continue;
        }

        let keep = match category {
            LinkCategory::All => true,
            LinkCategory::Internal | LinkCategory::External => {
                match is_internal(&absolute, page_url) {
                    Ok(internal) => internal == (category == LinkCategory::Internal),
                    Err(err) => {
                        tracing::debug!(link = %absolute, error = %err, "skipping unclassifiable link");
                        false
                    }
                }
            }
        };

        if keep {
            links.push(absolute);
        }
    }

    if links.is_empty() {
        None
    } else {
        Some(links)
    }
}
