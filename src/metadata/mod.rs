//! Metadata extraction module.
//!
//! Four independent extractors over a [`ParsedDocument`]: title,
//! description, favicons and links. Each is a pure function of the tree and
//! its arguments (the favicon fallback probe is passed in), returns `None`
//! when nothing qualifies, and never mutates the document.
//!
//! [`ParsedDocument`]: crate::ParsedDocument

pub mod favicons;
pub mod links;
pub mod meta_tags;

pub use favicons::{collect_favicons, extract_favicons};
pub use links::{extract_links, LinkCategory};
pub use meta_tags::{extract_description, extract_title};
