//! Title and description extraction.
//!
//! Both walk the document once in document order and stop at the first
//! qualifying node under `<head>`. The title also accepts the `<title>`
//! element itself; the description is meta-only.

use crate::document::{NodeId, ParsedDocument};

/// `name` values that carry a page title.
const TITLE_META_NAMES: &[&str] = &["title", "twitter:title"];
/// `property` values that carry a page title.
const TITLE_META_PROPERTIES: &[&str] = &["og:title"];

/// `name` values that carry a page description.
const DESCRIPTION_META_NAMES: &[&str] = &["description", "twitter:description"];
/// `property` values that carry a page description.
const DESCRIPTION_META_PROPERTIES: &[&str] = &["og:description"];

/// Non-empty `content` of a `<meta>` under `<head>` whose `name` or
/// `property` is one of the accepted values.
pub(crate) fn head_meta_content<'a>(
    doc: &'a ParsedDocument,
    id: NodeId,
    names: &[&str],
    properties: &[&str],
) -> Option<&'a str> {
    let node = doc.node(id);
    if !node.is_element("meta") || !doc.has_ancestor(id, "head") {
        return None;
    }

    if !node.attr_matches("name", names) && !node.attr_matches("property", properties) {
        return None;
    }

    node.attr("content").filter(|content| !content.is_empty())
}

/// Text of a `<title>` element under `<head>`.
///
/// An element without a text child yields an empty title rather than
/// nothing: `<title></title>` counts as present.
fn head_title_text(doc: &ParsedDocument, id: NodeId) -> Option<&str> {
    let node = doc.node(id);
    if !node.is_element("title") || !doc.has_ancestor(id, "head") {
        return None;
    }

    let text = node
        .children()
        .iter()
        .find_map(|&child| doc.node(child).text())
        .unwrap_or_default();
    Some(text)
}

/// Page title.
///
/// The first of these in document order wins:
/// - a `<title>` element under `<head>` (its first text child, verbatim)
/// - `<meta name="title|twitter:title">` or `<meta property="og:title">`
///   under `<head>` with a non-empty `content`
///
/// # Example
///
/// ```rust
/// use katsuragi::{extract_title, ParsedDocument};
///
/// let doc = ParsedDocument::parse(
///     r#"<html><head><meta property="og:title" content="Bar"><title>Foo</title></head></html>"#,
/// )?;
/// assert_eq!(extract_title(&doc).as_deref(), Some("Bar"));
/// # Ok::<(), katsuragi::Error>(())
/// ```
#[must_use]
pub fn extract_title(doc: &ParsedDocument) -> Option<String> {
    doc.descendants()
        .find_map(|id| {
            head_title_text(doc, id)
                .or_else(|| head_meta_content(doc, id, TITLE_META_NAMES, TITLE_META_PROPERTIES))
        })
        .map(str::to_string)
}

/// Page description from `description`, `twitter:description` or
/// `og:description` meta tags under `<head>`.
///
/// Empty `content` does not count.
#[must_use]
pub fn extract_description(doc: &ParsedDocument) -> Option<String> {
    doc.descendants()
        .find_map(|id| {
            head_meta_content(doc, id, DESCRIPTION_META_NAMES, DESCRIPTION_META_PROPERTIES)
        })
        .map(str::to_string)
}
