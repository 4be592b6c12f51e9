//! Arena-based mutable DOM tree for the Magpie HTML toolkit.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Ids are monotonically assigned and never reused, so a
//! reference held across mutations can go stale but never alias another
//! node.
//!
//! Structural invariants are enforced on every mutation, never "checked at
//! the end": a node is never its own ancestor or descendant, has at most
//! one parent at a time, and child lists stay ordered and duplicate-free.
//! A rejected mutation leaves the tree untouched.
//!
//! Serialization preserves quote characters, attribute order, self-closing
//! markers, and un-decoded entities, so unmodified well-formed input
//! round-trips byte-for-byte.

pub mod attribute;
pub mod error;
pub mod node;
pub mod serialize;
pub mod tag;
pub mod tree;

pub use attribute::{Attribute, AttributeQuote};
pub use error::DomError;
pub use node::{decode_entities, Node, NodeKind, TextData};
pub use tag::Tag;
pub use tree::{AncestorIterator, DescendantIterator, Document, NodeId};
