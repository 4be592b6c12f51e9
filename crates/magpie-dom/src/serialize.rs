//! Markup serialization: `inner_html` / `outer_html` / text extraction.
//!
//! Serialization is the inverse of parsing: quote characters, attribute
//! order, self-closing markers, and un-decoded entities are reproduced
//! exactly, so unmodified well-formed input round-trips byte-for-byte.
//! Rendered strings are cached per node and the cache is dropped (up the
//! ancestor chain) by every mutating operation, which keeps repeated calls
//! idempotent and cheap.

use crate::error::DomError;
use crate::node::NodeKind;
use crate::tree::{Document, NodeId};

impl Document {
    /// The markup of a node's contents: each child's `outer_html` in
    /// document order. For text and comment nodes this is the verbatim
    /// content itself.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownChildType`] when a child is not element content
    /// (the synthetic root attached below an element);
    /// [`DomError::NodeNotFound`] on stale ids.
    pub fn inner_html(&self, id: NodeId) -> Result<String, DomError> {
        let node = self.node(id)?;
        match node.kind() {
            NodeKind::Text(text) => return Ok(text.raw().to_string()),
            NodeKind::Comment(raw) => return Ok(raw.clone()),
            NodeKind::Root | NodeKind::Element(_) => {}
        }

        if let Some(cached) = node.html_cache.borrow().inner.clone() {
            return Ok(cached);
        }

        let mut html = String::new();
        for &child in node.children() {
            match self.node(child)?.kind() {
                // The root is not element content; refuse rather than skip.
                NodeKind::Root => return Err(DomError::UnknownChildType),
                _ => html.push_str(&self.outer_html(child)?),
            }
        }

        node.html_cache.borrow_mut().inner = Some(html.clone());
        Ok(html)
    }

    /// The markup of the node itself: opening tag + `inner_html` + closing
    /// tag for elements (opening markup only when self-closing), verbatim
    /// content for text and comment nodes, and the concatenated children
    /// for the root.
    ///
    /// # Errors
    ///
    /// As [`Document::inner_html`].
    pub fn outer_html(&self, id: NodeId) -> Result<String, DomError> {
        let node = self.node(id)?;
        let tag = match node.kind() {
            NodeKind::Root => return self.inner_html(id),
            NodeKind::Text(text) => return Ok(text.raw().to_string()),
            NodeKind::Comment(raw) => return Ok(raw.clone()),
            NodeKind::Element(tag) => tag.clone(),
        };

        if let Some(cached) = node.html_cache.borrow().outer.clone() {
            return Ok(cached);
        }

        let mut html = tag.opening_html();
        if !tag.is_self_closing() {
            html.push_str(&self.inner_html(id)?);
            html.push_str(&tag.closing_html());
        }

        node.html_cache.borrow_mut().outer = Some(html.clone());
        Ok(html)
    }

    /// The node's own text: the concatenation of its direct text-node
    /// children (or the raw content itself for a text node). Stale ids and
    /// non-text-bearing nodes yield an empty string.
    #[must_use]
    pub fn text(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match node.kind() {
            NodeKind::Text(text) => text.raw().to_string(),
            NodeKind::Comment(_) => String::new(),
            NodeKind::Root | NodeKind::Element(_) => node
                .children()
                .iter()
                .filter_map(|&child| self.as_text(child))
                .collect(),
        }
    }

    /// All text under the node, depth-first, in document order — the
    /// `lookInChildren` form of [`Document::text`].
    #[must_use]
    pub fn text_deep(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match node.kind() {
            NodeKind::Text(text) => text.raw().to_string(),
            NodeKind::Comment(_) => String::new(),
            NodeKind::Root | NodeKind::Element(_) => {
                let mut out = String::new();
                for &child in node.children() {
                    out.push_str(&self.text_deep(child));
                }
                out
            }
        }
    }
}
