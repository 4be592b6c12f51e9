//! The tag model: a name, an ordered attribute map, and a self-closing flag.
//!
//! Attribute order follows first insertion and survives later updates, which
//! is what lets serialization reproduce unmodified input byte-for-byte.

use indexmap::IndexMap;

use crate::attribute::{Attribute, AttributeQuote};
use crate::error::DomError;

/// The name + attributes + self-closing flag of an element node.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
/// "Elements have an associated ... local name" and "an associated attribute
/// list". Tag names are stored lowercase; attribute names keep the case they
/// were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: IndexMap<String, Attribute>,
    self_closing: bool,
    /// Raw payload carried by comment-style pseudo-tags.
    noise: Option<String>,
}

impl Tag {
    /// Create a tag with the given name (lowercased) and no attributes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            self_closing: false,
            noise: None,
        }
    }

    /// The tag name, always lowercase.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the tag (lowercased).
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_ascii_lowercase();
    }

    /// Mark this tag as self-closing (`<br />`).
    pub fn self_closing(&mut self) -> &mut Self {
        self.self_closing = true;
        self
    }

    /// Whether this tag renders as self-closing markup.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Attach a noise payload (used by comment-style pseudo-tags).
    pub fn noise(&mut self, noise: &str) -> &mut Self {
        self.noise = Some(noise.to_string());
        self
    }

    /// The noise payload, if any.
    #[must_use]
    pub fn get_noise(&self) -> Option<&str> {
        self.noise.as_deref()
    }

    /// Set (or fully replace) one attribute.
    ///
    /// Replacing semantics: the value and quote style are overwritten, other
    /// attributes are untouched, and the attribute keeps its original
    /// position in the ordering if it already existed.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>, quote: AttributeQuote) {
        self.attributes
            .insert(name.to_string(), Attribute::new(value, quote));
    }

    /// Set several attributes at once, with the same replacing semantics as
    /// [`Tag::set_attribute`].
    pub fn set_attributes<'a, I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (&'a str, Attribute)>,
    {
        for (name, attribute) in attributes {
            self.attributes.insert(name.to_string(), attribute);
        }
    }

    /// Look up an attribute by name.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::AttributeNotFound`] when the attribute is not set.
    pub fn get_attribute(&self, name: &str) -> Result<&Attribute, DomError> {
        self.attributes
            .get(name)
            .ok_or_else(|| DomError::AttributeNotFound(name.to_string()))
    }

    /// The value of an attribute, or `None` when absent or bare.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Attribute::value)
    }

    /// Whether the attribute is present at all (bare attributes count).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// All attributes in insertion order.
    #[must_use]
    pub const fn attributes(&self) -> &IndexMap<String, Attribute> {
        &self.attributes
    }

    /// Remove one attribute. Removing an absent attribute is a no-op.
    pub fn remove_attribute(&mut self, name: &str) {
        // shift_remove keeps the ordering of the remaining attributes intact
        let _ = self.attributes.shift_remove(name);
    }

    /// Remove every attribute.
    pub fn remove_all_attributes(&mut self) {
        self.attributes.clear();
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens."
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        match self.attribute_value("class") {
            Some(list) => list.split_ascii_whitespace().collect(),
            None => Vec::new(),
        }
    }

    /// Render the opening markup: `<name attr="v" bare />`.
    ///
    /// Attributes appear in insertion order with their stored quote style;
    /// bare attributes render without `=`; self-closing tags end in `" />"`.
    #[must_use]
    pub fn opening_html(&self) -> String {
        let mut html = format!("<{}", self.name);
        for (name, attribute) in &self.attributes {
            html.push(' ');
            html.push_str(&attribute.render(name));
        }
        if self.self_closing {
            html.push_str(" />");
        } else {
            html.push('>');
        }
        html
    }

    /// Render the closing markup: `</name>`, or nothing when self-closing.
    #[must_use]
    pub fn closing_html(&self) -> String {
        if self.self_closing {
            String::new()
        } else {
            format!("</{}>", self.name)
        }
    }

    /// Merge one CSS property into the semicolon-delimited `style` attribute.
    ///
    /// The existing declarations are parsed into an ordered property map,
    /// updated, and rebuilt as `prop:value;...`, so repeated calls keep the
    /// original declaration order.
    pub fn set_style_value(&mut self, property: &str, value: &str) {
        let mut styles = self.style_map();
        styles.insert(property.to_string(), value.to_string());

        let mut rebuilt = String::new();
        for (prop, val) in &styles {
            rebuilt.push_str(prop);
            rebuilt.push(':');
            rebuilt.push_str(val);
            rebuilt.push(';');
        }
        self.set_attribute("style", Some(&rebuilt), AttributeQuote::Double);
    }

    /// The `style` attribute parsed into an ordered property → value map.
    #[must_use]
    pub fn style_map(&self) -> IndexMap<String, String> {
        let mut styles = IndexMap::new();
        let Some(raw) = self.attribute_value("style") else {
            return styles;
        };
        for declaration in raw.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let property = property.trim();
            if property.is_empty() {
                continue;
            }
            let _ = styles.insert(property.to_string(), value.trim().to_string());
        }
        styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_attribute_keeps_first_insertion_order() {
        let mut tag = Tag::new("a");
        tag.set_attribute("href", Some("google.com"), AttributeQuote::Double);
        tag.set_attribute("class", Some("x"), AttributeQuote::Double);
        tag.set_attribute("href", Some("bing.com"), AttributeQuote::Double);

        let names: Vec<&str> = tag.attributes().keys().map(String::as_str).collect();
        assert_eq!(names, ["href", "class"]);
        assert_eq!(tag.attribute_value("href"), Some("bing.com"));
    }

    #[test]
    fn style_value_merges_in_order() {
        let mut tag = Tag::new("div");
        tag.set_style_value("display", "none");
        assert_eq!(tag.attribute_value("style"), Some("display:none;"));

        tag.set_style_value("color", "red");
        tag.set_style_value("display", "block");
        assert_eq!(tag.attribute_value("style"), Some("display:block;color:red;"));
    }
}
