//! Selector evaluation against a document subtree.
//!
//! [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
//!
//! Candidates are enumerated in document order from the query origin, so
//! results come back ordered and deduplicated by construction. Combinator
//! matching walks right-to-left from the subject, and every walk is bounded
//! at the origin: an ancestor at or above the origin can never satisfy a
//! left-hand step, which keeps `node.find(...)` scoped to that node's
//! subtree.

use magpie_dom::{Document, NodeId, Tag};

use crate::selector::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Selector, SimpleSelector,
};

/// Every element in `origin`'s subtree matching `selector`, in document
/// order, without duplicates. The origin itself is never a match.
#[must_use]
pub fn query(doc: &Document, origin: NodeId, selector: &Selector) -> Vec<NodeId> {
    doc.descendants(origin)
        .filter(|&id| doc.tag(id).is_some())
        .filter(|&id| {
            selector
                .selectors
                .iter()
                .any(|complex| matches_complex(doc, origin, complex, id))
        })
        .collect()
}

/// Whether `id` (already inside the origin's subtree) is represented by the
/// complex selector.
fn matches_complex(doc: &Document, origin: NodeId, complex: &ComplexSelector, id: NodeId) -> bool {
    if !compound_matches(doc, &complex.subject, id) {
        return false;
    }

    // Walk the combinator chain right-to-left, from the subject outward.
    let mut current = id;
    for (combinator, compound) in &complex.combinators {
        let stepped = match combinator {
            // [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
            // any ancestor below the origin
            Combinator::Descendant => doc
                .ancestors(current)
                .take_while(|&ancestor| ancestor != origin)
                .find(|&ancestor| compound_matches(doc, compound, ancestor)),

            // [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
            // the immediate parent, still below the origin
            Combinator::Child => doc
                .parent(current)
                .filter(|&parent| parent != origin)
                .filter(|&parent| compound_matches(doc, compound, parent)),

            // [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
            // the immediately preceding element sibling
            Combinator::NextSibling => preceding_element_siblings(doc, current)
                .next()
                .filter(|&sibling| compound_matches(doc, compound, sibling)),

            // [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
            // any preceding element sibling
            Combinator::SubsequentSibling => preceding_element_siblings(doc, current)
                .find(|&sibling| compound_matches(doc, compound, sibling)),
        };
        match stepped {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

/// Preceding element siblings of `id`, nearest first, text and comment
/// nodes skipped.
fn preceding_element_siblings(doc: &Document, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let siblings: Vec<NodeId> = match doc.parent(id) {
        Some(parent) => {
            let children = doc.children(parent);
            match children.iter().position(|&c| c == id) {
                Some(position) => children[..position]
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&c| doc.tag(c).is_some())
                    .collect(),
                None => Vec::new(),
            }
        }
        None => Vec::new(),
    };
    siblings.into_iter()
}

/// All simple selectors of the compound must hold for the element.
fn compound_matches(doc: &Document, compound: &CompoundSelector, id: NodeId) -> bool {
    let Some(tag) = doc.tag(id) else {
        return false;
    };
    compound
        .simple_selectors
        .iter()
        .all(|simple| simple_matches(simple, tag))
}

fn simple_matches(simple: &SimpleSelector, tag: &Tag) -> bool {
    match simple {
        // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
        SimpleSelector::Type(name) => tag.name().eq_ignore_ascii_case(name),

        // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
        SimpleSelector::Class(class) => tag.classes().contains(&class.as_str()),

        // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
        SimpleSelector::Id(id) => tag.attribute_value("id") == Some(id.as_str()),

        // [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
        SimpleSelector::Universal => true,

        // [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
        SimpleSelector::Attribute(attr) => match attr {
            AttributeSelector::Exists(name) => tag.has_attribute(name),
            AttributeSelector::Equals(name, value) => {
                tag.attribute_value(name) == Some(value.as_str())
            }
            AttributeSelector::Includes(name, value) => tag
                .attribute_value(name)
                .is_some_and(|v| v.split_ascii_whitespace().any(|word| word == value)),
            AttributeSelector::DashMatch(name, value) => {
                tag.attribute_value(name).is_some_and(|v| {
                    v == value
                        || (v.starts_with(value.as_str())
                            && v[value.len()..].starts_with('-'))
                })
            }
            AttributeSelector::PrefixMatch(name, value) => tag
                .attribute_value(name)
                .is_some_and(|v| v.starts_with(value.as_str())),
            AttributeSelector::SuffixMatch(name, value) => tag
                .attribute_value(name)
                .is_some_and(|v| v.ends_with(value.as_str())),
            AttributeSelector::SubstringMatch(name, value) => tag
                .attribute_value(name)
                .is_some_and(|v| v.contains(value.as_str())),
        },
    }
}
