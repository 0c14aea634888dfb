//! Favicon discovery.
//!
//! Collects every icon `<link>` and square `og:image` under `<head>`, makes
//! them absolute against the page URL and removes duplicates. Pages that
//! declare nothing get one last chance through `/favicon.ico` at the site
//! root, which browsers request implicitly.

use crate::document::{NodeId, ParsedDocument};
use crate::url_utils::{anchor_to_site_root, favicon_ico_url};

/// `rel` values that mark a favicon link.
const ICON_RELS: &[&str] = &["icon", "apple-touch-icon", "shortcut icon"];

/// How many element siblings after an `og:image` are searched for its size.
const OG_IMAGE_SIZE_WINDOW: usize = 3;

/// Page favicons, with a `/favicon.ico` fallback.
///
/// `probe` is asked whether a URL answers with HTTP 200; it is only called
/// when the markup declares no icon at all. Returns `None` when neither the
/// markup nor the fallback yields anything.
pub fn extract_favicons<P>(doc: &ParsedDocument, page_url: &str, probe: P) -> Option<Vec<String>>
where
    P: Fn(&str) -> bool,
{
    let mut favicons = collect_favicons(doc, page_url);

    if favicons.is_empty() {
        if let Some(fallback) = favicon_ico_url(page_url) {
            let found = probe(&fallback);
            tracing::debug!(url = %fallback, found, "favicon.ico fallback");
            if found {
                favicons.push(fallback);
            }
        }
    }

    if favicons.is_empty() {
        None
    } else {
        Some(favicons)
    }
}

/// Favicons declared in the markup: absolute, deduplicated, in document order.
#[must_use]
pub fn collect_favicons(doc: &ParsedDocument, page_url: &str) -> Vec<String> {
    let mut favicons: Vec<String> = Vec::new();

    for id in doc.descendants() {
        let Some(href) = icon_link_href(doc, id).or_else(|| square_og_image(doc, id)) else {
            continue;
        };

        let absolute = anchor_to_site_root(href, page_url);
        if !favicons.contains(&absolute) {
            favicons.push(absolute);
        }
    }

    favicons
}

/// `href` of a `<link rel="icon|apple-touch-icon|shortcut icon">` under `<head>`.
fn icon_link_href(doc: &ParsedDocument, id: NodeId) -> Option<&str> {
    let node = doc.node(id);
    if !node.is_element("link") || !doc.has_ancestor(id, "head") {
        return None;
    }

    if !node.attr_matches("rel", ICON_RELS) {
        return None;
    }

    node.attr("href").filter(|href| !href.is_empty())
}

/// `content` of an `og:image` meta under `<head>` that passes the aspect check.
fn square_og_image(doc: &ParsedDocument, id: NodeId) -> Option<&str> {
    let node = doc.node(id);
    if !node.is_element("meta")
        || !doc.has_ancestor(id, "head")
        || !node.attr_matches("property", &["og:image"])
    {
        return None;
    }

    let content = node.attr("content").filter(|c| !c.is_empty())?;
    og_image_is_square(doc, id).then_some(content)
}

/// Aspect-ratio gate for an `og:image`.
///
/// Looks at up to three element siblings that follow the tag for
/// `og:image:width` and `og:image:height`. Authors conventionally put those
/// right after their image, but nothing guarantees it. The image passes when
/// no full size is declared in that window, or when width and height are
/// equal and non-empty.
fn og_image_is_square(doc: &ParsedDocument, id: NodeId) -> bool {
    let mut width = None;
    let mut height = None;

    for sibling in doc.next_element_siblings(id).take(OG_IMAGE_SIZE_WINDOW) {
        let node = doc.node(sibling);
        if !node.is_element("meta") {
            continue;
        }
        let content = node.attr("content").unwrap_or_default();
        if width.is_none() && node.attr_matches("property", &["og:image:width"]) {
            width = Some(content);
        } else if height.is_none() && node.attr_matches("property", &["og:image:height"]) {
            height = Some(content);
        }
        if width.is_some() && height.is_some() {
            break;
        }
    }

    match (width, height) {
        (Some(w), Some(h)) => !w.is_empty() && w == h,
        _ => true,
    }
}
