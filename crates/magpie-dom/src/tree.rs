//! Arena-based document tree with O(1) node access and invariant-checked
//! mutation.
//!
//! [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
//!
//! "The DOM represents a document as a tree. A tree is a finite hierarchical
//! tree structure."
//!
//! All nodes live in one vector owned by the [`Document`]; ids are indices
//! into it. Ids are handed out monotonically and never reused: deleting a
//! subtree tombstones its slots, so a stale id held by the caller fails
//! lookups cleanly instead of aliasing a newer node. Every mutating
//! operation checks its invariants *before* touching state — a rejected
//! mutation leaves the tree exactly as it was.

use crate::error::DomError;
use crate::node::{HtmlCache, Node, NodeKind, TextData};
use crate::tag::Tag;

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node without borrowing issues;
/// holders of an id are never invalidated by mutation elsewhere, they can
/// only go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// The document tree: an arena of nodes plus the synthetic root.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes ever allocated, indexed by `NodeId`. Deleted nodes leave a
    /// `None` tombstone behind so their ids are never reissued.
    nodes: Vec<Option<Node>>,
}

impl Document {
    /// Create a document containing only the synthetic root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new(NodeKind::Root))],
        }
    }

    /// The root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by id. `None` when the id is stale or out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Get a node by id, failing on stale references.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] when the id is not live.
    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::NodeNotFound(id))
    }

    /// Number of live nodes (the root included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// A document always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========== allocation ==========

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(kind)));
        id
    }

    /// Allocate a detached element node owning `tag`.
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.alloc(NodeKind::Element(tag))
    }

    /// Allocate a detached element node with an attribute-less tag.
    pub fn create_element_named(&mut self, name: &str) -> NodeId {
        self.create_element(Tag::new(name))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(TextData::new(text)))
    }

    /// Allocate a detached comment node holding the verbatim markup,
    /// delimiters included.
    pub fn create_comment(&mut self, raw: &str) -> NodeId {
        self.alloc(NodeKind::Comment(raw.to_string()))
    }

    // ========== structural mutation ==========

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Returns `false` (and changes nothing) when the
    /// node is already a child of this exact parent.
    ///
    /// # Errors
    ///
    /// [`DomError::CircularReference`] when the attach would make a node its
    /// own ancestor; [`DomError::NodeNotFound`] on stale ids. On error the
    /// tree is untouched.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, DomError> {
        self.check_attachable(parent, child)?;
        if self.node(child)?.parent == Some(parent) {
            return Ok(false);
        }
        self.detach(child);
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        self.invalidate_html(parent);
        Ok(true)
    }

    /// Move `child` under `new_parent`, appended at the end of its children.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Document::add_child`].
    pub fn set_parent(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), DomError> {
        let _ = self.add_child(new_parent, child)?;
        Ok(())
    }

    /// Insert `new` directly before the child `reference` of `parent`.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `reference` is not a current child;
    /// otherwise as [`Document::add_child`].
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.insert_at(parent, new, reference, 0)
    }

    /// Insert `new` directly after the child `reference` of `parent`.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `reference` is not a current child;
    /// otherwise as [`Document::add_child`].
    pub fn insert_after(
        &mut self,
        parent: NodeId,
        new: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.insert_at(parent, new, reference, 1)
    }

    fn insert_at(
        &mut self,
        parent: NodeId,
        new: NodeId,
        reference: NodeId,
        offset: usize,
    ) -> Result<(), DomError> {
        self.check_attachable(parent, new)?;
        if !self.node(parent)?.children.contains(&reference) {
            return Err(DomError::ChildNotFound);
        }
        if new == reference {
            return Ok(());
        }
        // Detach first: if `new` shared this parent, the reference position
        // shifts, so the index is computed afterwards.
        self.detach(new);
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == reference)
            .ok_or(DomError::ChildNotFound)?;
        if let Some(node) = self.get_mut(parent) {
            node.children.insert(position + offset, new);
        }
        if let Some(node) = self.get_mut(new) {
            node.parent = Some(parent);
        }
        self.invalidate_html(parent);
        Ok(())
    }

    /// Remove `child` from `parent`'s child list, leaving it detached but
    /// alive. Removing a node that is not a current child is a no-op.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let is_child = self
            .get(parent)
            .is_some_and(|node| node.children.contains(&child));
        if !is_child {
            return;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        self.invalidate_html(parent);
    }

    /// Swap the child `old` of `parent` for `new`, preserving position.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `old` is not a current child;
    /// otherwise as [`Document::add_child`]. The swap is atomic: on error
    /// nothing has changed.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), DomError> {
        self.check_attachable(parent, new)?;
        if !self.node(parent)?.children.contains(&old) {
            return Err(DomError::ChildNotFound);
        }
        if old == new {
            return Ok(());
        }
        self.detach(new);
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or(DomError::ChildNotFound)?;
        if let Some(node) = self.get_mut(parent) {
            node.children[position] = new;
        }
        if let Some(node) = self.get_mut(old) {
            node.parent = None;
        }
        if let Some(node) = self.get_mut(new) {
            node.parent = Some(parent);
        }
        self.invalidate_html(parent);
        Ok(())
    }

    /// Detach `id` from its parent and release its whole subtree.
    ///
    /// The freed slots are tombstoned; the ids are never reused, so stale
    /// references held elsewhere simply stop resolving. Deleting the root is
    /// a no-op.
    pub fn delete(&mut self, id: NodeId) {
        if id == NodeId::ROOT {
            return;
        }
        self.detach(id);
        let mut doomed = vec![id];
        let mut index = 0;
        while index < doomed.len() {
            if let Some(node) = self.get(doomed[index]) {
                doomed.extend_from_slice(&node.children);
            }
            index += 1;
        }
        for dead in doomed {
            if let Some(slot) = self.nodes.get_mut(dead.0) {
                *slot = None;
            }
        }
    }

    /// Cycle guard shared by every attach path: a node may not become its
    /// own ancestor or descendant.
    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let _ = self.node(parent)?;
        let _ = self.node(child)?;
        if parent == child || self.is_ancestor(parent, child) {
            return Err(DomError::CircularReference);
        }
        Ok(())
    }

    /// Unlink `child` from whatever parent currently holds it.
    fn detach(&mut self, child: NodeId) {
        let Some(parent_id) = self.get(child).and_then(Node::parent) else {
            return;
        };
        self.invalidate_html(parent_id);
        if let Some(parent) = self.get_mut(parent_id) {
            parent.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
    }

    /// Drop cached markup from `from` up through every ancestor; their
    /// rendered HTML all embeds the mutated subtree.
    pub(crate) fn invalidate_html(&self, from: NodeId) {
        let mut current = Some(from);
        while let Some(id) = current {
            let Some(node) = self.get(id) else { break };
            *node.html_cache.borrow_mut() = HtmlCache::default();
            current = node.parent;
        }
    }

    // ========== navigation ==========

    /// The parent of a node, `None` when detached (or the root, or stale).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// All children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Whether the node currently has children.
    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// Number of direct children.
    #[must_use]
    pub fn count_children(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Get a direct child by id.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `child` is not a current child.
    pub fn get_child(&self, parent: NodeId, child: NodeId) -> Result<&Node, DomError> {
        if !self.children(parent).contains(&child) {
            return Err(DomError::ChildNotFound);
        }
        self.node(child)
    }

    /// Whether `candidate` is a direct child of `parent`.
    #[must_use]
    pub fn is_child(&self, parent: NodeId, candidate: NodeId) -> bool {
        self.children(parent).contains(&candidate)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Whether `candidate` is a descendant of `id`, any depth.
    #[must_use]
    pub fn is_descendant(&self, id: NodeId, candidate: NodeId) -> bool {
        self.is_ancestor(candidate, id)
    }

    /// Whether `candidate` appears in the parent chain of `id`.
    #[must_use]
    pub fn is_ancestor(&self, id: NodeId, candidate: NodeId) -> bool {
        self.ancestors(id).any(|ancestor| ancestor == candidate)
    }

    /// Walk the inclusive ancestor chain for `target`: the node itself
    /// first, then each parent. `None` when the root is reached without a
    /// match — a miss, not an error.
    #[must_use]
    pub fn get_ancestor(&self, id: NodeId, target: NodeId) -> Option<NodeId> {
        if id == target {
            return self.get(id).map(|_| id);
        }
        self.ancestors(id).find(|&ancestor| ancestor == target)
    }

    /// Walk the inclusive ancestor chain for a tag name (the node itself is
    /// checked first). Text, comment, and root nodes answer to the
    /// pseudo-names `text`, `comment`, and `root`.
    ///
    /// # Errors
    ///
    /// [`DomError::ParentNotFound`] when nothing in the chain matches.
    pub fn ancestor_by_tag(&self, id: NodeId, name: &str) -> Result<NodeId, DomError> {
        let wanted = name.to_ascii_lowercase();
        let mut current = self.get(id).map(|_| id);
        while let Some(node_id) = current {
            if self.pseudo_tag_name(node_id) == Some(wanted.as_str()) {
                return Ok(node_id);
            }
            current = self.parent(node_id);
        }
        Err(DomError::ParentNotFound)
    }

    /// The tag name of an element, or the variant pseudo-name for the rest.
    fn pseudo_tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|node| match node.kind() {
            NodeKind::Root => "root",
            NodeKind::Element(tag) => tag.name(),
            NodeKind::Text(_) => "text",
            NodeKind::Comment(_) => "comment",
        })
    }

    /// First child of a node.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when there are no children.
    pub fn first_child(&self, id: NodeId) -> Result<NodeId, DomError> {
        self.children(id).first().copied().ok_or(DomError::ChildNotFound)
    }

    /// Last child of a node.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when there are no children.
    pub fn last_child(&self, id: NodeId) -> Result<NodeId, DomError> {
        self.children(id).last().copied().ok_or(DomError::ChildNotFound)
    }

    /// The child following `child` in `parent`'s current order. Ids removed
    /// since the caller last looked are naturally skipped — the scan only
    /// sees live children.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `child` is not a current child or
    /// has no following sibling.
    pub fn next_child(&self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        let children = self.children(parent);
        let position = children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::ChildNotFound)?;
        children
            .get(position + 1)
            .copied()
            .ok_or(DomError::ChildNotFound)
    }

    /// The child preceding `child` in `parent`'s current order.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `child` is not a current child or
    /// has no preceding sibling.
    pub fn previous_child(&self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        let children = self.children(parent);
        let position = children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::ChildNotFound)?;
        position
            .checked_sub(1)
            .and_then(|p| children.get(p))
            .copied()
            .ok_or(DomError::ChildNotFound)
    }

    /// Whether `child` has a following sibling under `parent`.
    ///
    /// # Errors
    ///
    /// [`DomError::ChildNotFound`] when `child` is not a current child.
    pub fn has_next_child(&self, parent: NodeId, child: NodeId) -> Result<bool, DomError> {
        let children = self.children(parent);
        let position = children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::ChildNotFound)?;
        Ok(position + 1 < children.len())
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    ///
    /// The sibling after this node, computed from the parent's child order.
    ///
    /// # Errors
    ///
    /// [`DomError::ParentNotFound`] when the node is detached,
    /// [`DomError::ChildNotFound`] when it has no following sibling.
    pub fn next_sibling(&self, id: NodeId) -> Result<NodeId, DomError> {
        let parent = self.parent(id).ok_or(DomError::ParentNotFound)?;
        self.next_child(parent, id)
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    ///
    /// The sibling before this node, computed from the parent's child order.
    ///
    /// # Errors
    ///
    /// [`DomError::ParentNotFound`] when the node is detached,
    /// [`DomError::ChildNotFound`] when it has no preceding sibling.
    pub fn previous_sibling(&self, id: NodeId) -> Result<NodeId, DomError> {
        let parent = self.parent(id).ok_or(DomError::ParentNotFound)?;
        self.previous_child(parent, id)
    }

    /// Iterate over the ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            doc: self,
            current: self.parent(id),
        }
    }

    /// Iterate over every node below `id` in document (pre-) order, the
    /// node itself excluded.
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack = Vec::new();
        stack.extend(self.children(id).iter().rev().copied());
        DescendantIterator { doc: self, stack }
    }

    // ========== element payload access ==========

    /// The element tag of a node, when it is an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.get(id).and_then(Node::tag)
    }

    /// Mutable access to an element's tag. Cached markup for the node and
    /// its ancestors is dropped, since any tag change affects it.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] on stale ids,
    /// [`DomError::UnsupportedNodeType`] for non-element nodes.
    pub fn tag_mut(&mut self, id: NodeId) -> Result<&mut Tag, DomError> {
        self.invalidate_html(id);
        match self.get_mut(id) {
            None => Err(DomError::NodeNotFound(id)),
            Some(node) => match &mut node.kind {
                NodeKind::Element(tag) => Ok(tag),
                _ => Err(DomError::UnsupportedNodeType),
            },
        }
    }

    /// Replace an element's whole tag.
    ///
    /// # Errors
    ///
    /// As [`Document::tag_mut`].
    pub fn set_tag(&mut self, id: NodeId, tag: Tag) -> Result<(), DomError> {
        *self.tag_mut(id)? = tag;
        Ok(())
    }

    /// Rename an element's tag in place.
    ///
    /// # Errors
    ///
    /// As [`Document::tag_mut`].
    pub fn set_tag_name(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.tag_mut(id)?.set_name(name);
        Ok(())
    }

    /// Raw text content, when the node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|node| match node.kind() {
            NodeKind::Text(text) => Some(text.raw()),
            _ => None,
        })
    }

    /// Entity-decoded text content, computed lazily, when the node is a
    /// text node.
    #[must_use]
    pub fn decoded_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|node| match node.kind() {
            NodeKind::Text(text) => Some(text.decoded()),
            _ => None,
        })
    }

    /// Replace a text node's content.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] on stale ids,
    /// [`DomError::UnsupportedNodeType`] for non-text nodes.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.invalidate_html(id);
        match self.get_mut(id) {
            None => Err(DomError::NodeNotFound(id)),
            Some(node) => match &mut node.kind {
                NodeKind::Text(data) => {
                    data.set(text);
                    Ok(())
                }
                _ => Err(DomError::UnsupportedNodeType),
            },
        }
    }

    // ========== node-level attribute conveniences ==========

    /// The value of an attribute on an element node. `None` when the node is
    /// not an element, the attribute is absent, or it is bare — a miss, not
    /// an error.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.tag(id)
            .and_then(|tag| tag.attribute_value(name))
            .map(str::to_string)
    }

    /// Set one attribute on an element node.
    ///
    /// # Errors
    ///
    /// As [`Document::tag_mut`].
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: Option<&str>,
        quote: crate::AttributeQuote,
    ) -> Result<(), DomError> {
        self.tag_mut(id)?.set_attribute(name, value, quote);
        Ok(())
    }

    /// Remove one attribute from an element node.
    ///
    /// # Errors
    ///
    /// As [`Document::tag_mut`].
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.tag_mut(id)?.remove_attribute(name);
        Ok(())
    }

    /// Remove every attribute from an element node.
    ///
    /// # Errors
    ///
    /// As [`Document::tag_mut`].
    pub fn remove_all_attributes(&mut self, id: NodeId) -> Result<(), DomError> {
        self.tag_mut(id)?.remove_all_attributes();
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.doc.parent(id);
        Some(id)
    }
}

/// Iterator over the descendants of a node in document order.
pub struct DescendantIterator<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
