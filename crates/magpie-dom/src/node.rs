//! Node variants stored in the document arena.

use std::cell::{OnceCell, RefCell};

use crate::tag::Tag;
use crate::tree::NodeId;

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// One slot in the arena: the variant payload plus id-valued parent/child
/// links. Links are lookups into the owning [`Document`](crate::Document),
/// never owning references, so no cycle of live references can form.
#[derive(Debug, Clone)]
pub struct Node {
    /// The variant payload.
    pub(crate) kind: NodeKind,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub(crate) parent: Option<NodeId>,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children" — ordered, duplicate-free.
    pub(crate) children: Vec<NodeId>,
    /// Lazily rendered markup, dropped whenever this node or anything under
    /// it mutates.
    pub(crate) html_cache: RefCell<HtmlCache>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            html_cache: RefCell::new(HtmlCache::default()),
        }
    }

    /// The variant payload.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The parent id, or `None` for a detached node and the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The element tag, when this node is an element.
    #[must_use]
    pub const fn tag(&self) -> Option<&Tag> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Whether this node is a text node.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Whether this node is a comment (or other verbatim raw-markup) node.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Comment(_))
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The synthetic document root. Exactly one per document; never valid as
    /// element content.
    Root,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// An element with a [`Tag`] and ordered children.
    Element(Tag),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// A text run, stored exactly as it appeared in the source.
    Text(TextData),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// A comment, doctype, or CDATA section kept verbatim, delimiters
    /// included, so it round-trips untouched.
    Comment(String),
}

/// Text content with entities left un-decoded.
///
/// The raw form is what serialization emits (round-trip fidelity); the
/// decoded view resolves character references lazily, on first request.
#[derive(Debug, Clone)]
pub struct TextData {
    raw: String,
    decoded: OnceCell<String>,
}

impl TextData {
    /// Wrap a raw text run.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            decoded: OnceCell::new(),
        }
    }

    /// The text exactly as it appeared in the source, entities preserved.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The text with character references resolved, computed on first use.
    #[must_use]
    pub fn decoded(&self) -> &str {
        self.decoded.get_or_init(|| decode_entities(&self.raw))
    }

    /// Replace the text, discarding the decoded view.
    pub fn set(&mut self, raw: &str) {
        self.raw = raw.to_string();
        self.decoded = OnceCell::new();
    }
}

/// Resolve the common named character references plus numeric forms.
///
/// Anything unrecognized is passed through untouched; this is a convenience
/// view, not an HTML5 entity table.
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let Some(end) = rest.find(';') else {
            // no terminator, pass the rest through
            out.push_str(rest);
            return out;
        };
        let entity = &rest[1..end];
        match resolve_entity(entity) {
            Some(ch) => out.push(ch),
            None => out.push_str(&rest[..=end]),
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Cached markup renderings for one node.
#[derive(Debug, Clone, Default)]
pub(crate) struct HtmlCache {
    pub(crate) inner: Option<String>,
    pub(crate) outer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_text_preserves_entities() {
        let text = TextData::new("&#x69;");
        assert_eq!(text.raw(), "&#x69;");
        assert_eq!(text.decoded(), "i");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode_entities("a &bogus; b &amp; c"), "a &bogus; b & c");
        assert_eq!(decode_entities("no terminator &amp"), "no terminator &amp");
    }
}
