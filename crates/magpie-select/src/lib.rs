//! CSS selector parsing and matching over the Magpie DOM.
//!
//! # Scope
//!
//! This crate implements the selector subset a scraping library needs, per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/):
//! - Type, class, ID, and universal selectors
//! - The attribute selector operator family (`[a]`, `=`, `~=`, `|=`, `^=`,
//!   `$=`, `*=`)
//! - Compound selectors and the four combinators (descendant, child,
//!   next-sibling, subsequent-sibling)
//! - Comma-separated selector groups
//!
//! Not implemented: pseudo-classes, pseudo-elements, namespaces. Parsing
//! reports them as unsupported instead of matching nothing silently.

pub mod matcher;
pub mod selector;

pub use matcher::query;
pub use selector::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Selector, SelectorError,
    SimpleSelector,
};
