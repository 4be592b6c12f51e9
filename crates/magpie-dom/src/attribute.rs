//! A single element attribute: optional value plus the quote style it was
//! written with, so serialization can reproduce the source byte-for-byte.

/// The quote character an attribute value was delimited with in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeQuote {
    /// `name="value"`
    #[default]
    Double,
    /// `name='value'`
    Single,
    /// `name=value` (no quoting in the source)
    None,
}

/// One attribute of a [`Tag`](crate::Tag).
///
/// "Present with null value" (`<option disabled>`) is distinct from absent:
/// a `None` value renders as a bare attribute name with no `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    value: Option<String>,
    quote: AttributeQuote,
}

impl Attribute {
    /// Create an attribute with the given value and quote style.
    #[must_use]
    pub fn new(value: Option<&str>, quote: AttributeQuote) -> Self {
        Self {
            value: value.map(str::to_string),
            quote,
        }
    }

    /// The attribute value, or `None` for a bare attribute.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the attribute value.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value.map(str::to_string);
    }

    /// The quote style used when rendering this attribute.
    #[must_use]
    pub const fn quote(&self) -> AttributeQuote {
        self.quote
    }

    /// Change the quote style used when rendering this attribute.
    pub fn set_quote(&mut self, quote: AttributeQuote) {
        self.quote = quote;
    }

    /// Render this attribute as it appears inside an opening tag.
    #[must_use]
    pub fn render(&self, name: &str) -> String {
        match &self.value {
            None => name.to_string(),
            Some(value) => match self.quote {
                AttributeQuote::Double => format!("{name}=\"{value}\""),
                AttributeQuote::Single => format!("{name}='{value}'"),
                AttributeQuote::None => format!("{name}={value}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_quote_style() {
        assert_eq!(
            Attribute::new(Some("a b"), AttributeQuote::Double).render("class"),
            "class=\"a b\""
        );
        assert_eq!(
            Attribute::new(Some("x"), AttributeQuote::Single).render("id"),
            "id='x'"
        );
        assert_eq!(
            Attribute::new(Some("x"), AttributeQuote::None).render("id"),
            "id=x"
        );
    }

    #[test]
    fn bare_attribute_renders_name_only() {
        assert_eq!(
            Attribute::new(None, AttributeQuote::Double).render("disabled"),
            "disabled"
        );
    }
}
