//! Parsed document tree.
//!
//! The HTML parser (`dom_query`, html5ever underneath) produces a tree that
//! is tied to a single thread. Documents live in a cache shared by many
//! callers, so the parser output is copied once into an immutable arena:
//! parents own their children through index lists and every node keeps a
//! plain `NodeId` back-reference to its parent for upward navigation.

use dom_query::{Document, NodeRef};

use crate::error::{Error, Result};

/// Index of a node inside its [`ParsedDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// An element with its lowercase tag name and attributes in source order.
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node.
    Text(String),
    /// Comments, doctypes and processing instructions.
    Other,
}

/// A single node of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Position among the parent's children.
    index: usize,
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Tag name if this is an element.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True if this is an element with the given tag name.
    #[must_use]
    pub fn is_element(&self, tag: &str) -> bool {
        self.tag_name().is_some_and(|name| name == tag)
    }

    /// First value of the named attribute (duplicates are ignored).
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// True if the named attribute equals one of `accepted`, ignoring ASCII
    /// case and surrounding whitespace.
    ///
    /// Used for keyword attributes (`name`, `property`, `rel`). Free-form
    /// values such as `content` and `href` are compared as written.
    #[must_use]
    pub fn attr_matches(&self, key: &str, accepted: &[&str]) -> bool {
        self.attr(key).is_some_and(|value| {
            let value = value.trim();
            accepted.iter().any(|a| value.eq_ignore_ascii_case(a))
        })
    }

    /// Content if this is a text node.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An immutable, thread-safe document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    nodes: Vec<Node>,
}

impl ParsedDocument {
    /// Parse HTML markup into a document tree.
    ///
    /// The parser is forgiving: broken markup still yields a tree. Only an
    /// empty or whitespace-only input is rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use katsuragi::ParsedDocument;
    ///
    /// let doc = ParsedDocument::parse("<html><head><title>Hi</title></head></html>")?;
    /// assert!(doc.descendants().any(|id| doc.node(id).is_element("title")));
    /// # Ok::<(), katsuragi::Error>(())
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(Error::Parse("empty document".to_string()));
        }

        let source = Document::from(html);
        Ok(Self::from_dom(&source))
    }

    /// Copy a `dom_query` tree into the arena.
    fn from_dom(source: &Document) -> Self {
        let mut nodes = vec![Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
            index: 0,
        }];

        // Explicit stack keeps deep documents off the call stack.
        let mut stack: Vec<(NodeRef, NodeId)> = source
            .root()
            .children()
            .into_iter()
            .rev()
            .map(|child| (child, NodeId(0)))
            .collect();

        while let Some((dom_node, parent)) = stack.pop() {
            let id = NodeId(nodes.len());
            let index = nodes[parent.0].children.len();
            nodes[parent.0].children.push(id);
            nodes.push(Node {
                kind: convert_kind(&dom_node),
                parent: Some(parent),
                children: Vec::new(),
                index,
            });

            for child in dom_node.children().into_iter().rev() {
                stack.push((child, id));
            }
        }

        Self { nodes }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Access a node by id.
    ///
    /// Ids are only ever handed out by this document, so indexing is in bounds.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included. Never zero.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the parser produced anything below the root.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.nodes.len() > 1
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = self.node(node.parent?);
        parent.children.get(node.index + 1).copied()
    }

    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = self.node(node.parent?);
        node.index
            .checked_sub(1)
            .and_then(|i| parent.children.get(i).copied())
    }

    /// Following siblings that are elements, in source order.
    pub fn next_element_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.next_sibling(id), move |&s| self.next_sibling(s))
            .filter(move |&s| self.node(s).tag_name().is_some())
    }

    /// True if any ancestor of `id` is an element named `tag`.
    #[must_use]
    pub fn has_ancestor(&self, id: NodeId, tag: &str) -> bool {
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            let node = self.node(parent);
            if node.is_element(tag) {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Depth-first pre-order walk over every node below the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.node(self.root()).children.iter().rev().copied().collect(),
        }
    }
}

fn convert_kind(node: &NodeRef) -> NodeKind {
    if node.is_element() {
        let name = node
            .node_name()
            .map(|name| name.to_ascii_lowercase())
            .unwrap_or_default();
        let attrs = node
            .attrs()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        NodeKind::Element { name, attrs }
    } else if node.is_text() {
        NodeKind::Text(node.text().to_string())
    } else {
        NodeKind::Other
    }
}

/// Iterator returned by [`ParsedDocument::descendants`].
pub struct Descendants<'a> {
    doc: &'a ParsedDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node(id).children.iter().rev().copied());
        Some(id)
    }
}
