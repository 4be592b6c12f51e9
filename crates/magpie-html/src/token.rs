//! Named character classes used to bound scanner operations.
//!
//! Keeping these as a first-class enum (instead of scattering literal
//! character comparisons through the parser) means the same semantics-free
//! scanner serves tag-name, attribute-value, and comment-body contexts.

use strum_macros::Display;

/// A named character class for [`Content`](crate::Content) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StringToken {
    /// Whitespace between tokens inside a tag.
    Blank,
    /// Characters ending an attribute name: blank, `=`, `/`, `>`.
    Equal,
    /// Characters ending a tag name: blank, `/`, `>`.
    Slash,
    /// Characters ending an unquoted attribute value: blank, `>`.
    Attr,
}

impl StringToken {
    /// The members of this character class.
    #[must_use]
    pub const fn chars(self) -> &'static str {
        match self {
            Self::Blank => " \t\r\n",
            Self::Equal => " \t\r\n=/>",
            Self::Slash => " \t\r\n/>",
            Self::Attr => " \t\r\n>",
        }
    }
}
