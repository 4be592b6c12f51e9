//! Typed failures for tree navigation, mutation, and serialization.

use crate::tree::NodeId;
use thiserror::Error;

/// Errors raised by [`Document`](crate::Document) operations.
///
/// These are surfaced synchronously at the call that triggered them. A
/// rejected mutation leaves the tree exactly as it was; there are no partial
/// states to roll back and no internal retries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    /// A structural mutation would have made a node its own ancestor or
    /// descendant.
    #[error("operation would create a circular reference")]
    CircularReference,

    /// A referenced child id does not currently exist under the given parent,
    /// or navigation ran off the end of the child list.
    #[error("child not found")]
    ChildNotFound,

    /// Sibling or ancestor navigation was attempted on a node with no parent,
    /// or no matching ancestor exists.
    #[error("parent not found")]
    ParentNotFound,

    /// Lookup of an attribute name that is not set on the tag.
    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    /// Serialization encountered a child of a variant that is not element
    /// content (for example the synthetic document root attached below an
    /// element).
    #[error("unknown child type in serialization")]
    UnknownChildType,

    /// The id does not refer to a live node in this document. Ids are never
    /// reused, so a stale reference fails here instead of aliasing a newer
    /// node.
    #[error("no node with id {0:?} in this document")]
    NodeNotFound(NodeId),

    /// A variant-specific operation (tag access on a text node, text
    /// replacement on an element) was called on the wrong node kind.
    #[error("operation not supported for this node type")]
    UnsupportedNodeType,
}
