//! CSS selector data model and parsing.
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) a scraping
//! library needs: type/class/id/universal simple selectors, the attribute
//! selector operator family, the four combinators, and comma-separated
//! selector groups. Pseudo-classes and pseudo-elements are not supported;
//! parsing reports them as unsupported rather than silently matching
//! nothing.

use thiserror::Error;

/// A selector string could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector was empty (or whitespace only).
    #[error("empty selector")]
    Empty,

    /// A character outside the supported grammar.
    #[error("unsupported selector syntax at {0:?}")]
    Unsupported(char),

    /// An attribute selector missing its name, operator, value, or `]`.
    #[error("malformed attribute selector")]
    MalformedAttribute,

    /// A combinator with no selector on one of its sides.
    #[error("dangling combinator")]
    DanglingCombinator,
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// Examples: `div`, `p`, `font`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// Examples: `.post-user`, `.btn`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// Examples: `#main`, `#78`
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal,

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    /// Examples: `[href]`, `[type=text]`, `[href^=https]`
    Attribute(AttributeSelector),
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]` — the attribute is present (bare attributes count).
    Exists(String),
    /// `[attr=value]` — exact value match.
    Equals(String, String),
    /// `[attr~=value]` — whitespace-separated word match.
    Includes(String, String),
    /// `[attr|=value]` — exact match or `value-` prefix.
    DashMatch(String, String),
    /// `[attr^=value]` — value prefix.
    PrefixMatch(String, String),
    /// `[attr$=value]` — value suffix.
    SuffixMatch(String, String),
    /// `[attr*=value]` — value substring.
    SubstringMatch(String, String),
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: `A B` — B anywhere below A.
    Descendant,
    /// `A > B` — B directly below A.
    Child,
    /// `A + B` — B immediately follows A under the same parent.
    NextSibling,
    /// `A ~ B` — B follows A (not necessarily immediately) under the same
    /// parent.
    SubsequentSibling,
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// Simultaneous conditions on a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors that must all match.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// A chain of compound selectors joined by combinators. The rightmost
/// compound is the subject; the chain is stored right-to-left because
/// matching walks up and left from the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound — the element the selector represents.
    pub subject: CompoundSelector,
    /// `(combinator, compound)` pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// A parsed selector: one or more comma-separated complex selectors.
///
/// `".post-row div .post-user font"` parses to four compound steps chained
/// with descendant combinators; `"b, i"` parses to a two-member group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The members of the selector group; an element matching any member
    /// matches the selector.
    pub selectors: Vec<ComplexSelector>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// [`SelectorError`] when the string is empty, uses unsupported syntax
    /// (pseudo-classes, pseudo-elements), or is structurally malformed.
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let mut parser = SelectorParser::new(raw);
        parser.run()
    }
}

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c == '-'
}

struct SelectorParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    ident: String,
    compound: Vec<SimpleSelector>,
    compounds: Vec<CompoundSelector>,
    combinators: Vec<Combinator>,
    groups: Vec<ComplexSelector>,
}

impl<'a> SelectorParser<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            chars: raw.trim().chars().peekable(),
            ident: String::new(),
            compound: Vec::new(),
            compounds: Vec::new(),
            combinators: Vec::new(),
            groups: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<Selector, SelectorError> {
        while let Some(c) = self.chars.next() {
            match c {
                '.' => {
                    self.flush_ident();
                    let name = self.collect_ident();
                    if !name.is_empty() {
                        self.compound.push(SimpleSelector::Class(name));
                    }
                }
                '#' => {
                    self.flush_ident();
                    let name = self.collect_ident();
                    if !name.is_empty() {
                        self.compound.push(SimpleSelector::Id(name));
                    }
                }
                '*' => {
                    self.flush_ident();
                    self.compound.push(SimpleSelector::Universal);
                }
                '[' => {
                    self.flush_ident();
                    self.parse_attribute_selector()?;
                }
                ' ' | '\t' | '\n' | '\r' => self.handle_whitespace()?,
                '>' => self.push_combinator(Combinator::Child)?,
                '+' => self.push_combinator(Combinator::NextSibling)?,
                '~' => self.push_combinator(Combinator::SubsequentSibling)?,
                ',' => {
                    self.finish_group()?;
                    self.skip_whitespace();
                }
                _ if self.ident.is_empty() && (is_ident_start_char(c) || c == '-') => {
                    self.ident.push(c);
                }
                _ if !self.ident.is_empty() && is_ident_char(c) => {
                    self.ident.push(c);
                }
                other => return Err(SelectorError::Unsupported(other)),
            }
        }
        self.finish_group()?;

        if self.groups.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector {
            selectors: std::mem::take(&mut self.groups),
        })
    }

    /// Whitespace is either trivia around an explicit combinator/comma or a
    /// descendant combinator in its own right.
    fn handle_whitespace(&mut self) -> Result<(), SelectorError> {
        if self.ident.is_empty() && self.compound.is_empty() && self.compounds.is_empty() {
            return Ok(());
        }
        self.skip_whitespace();
        match self.chars.peek() {
            None | Some(',') => {
                self.flush_ident();
                Ok(())
            }
            Some('>' | '+' | '~') => {
                self.flush_ident();
                Ok(())
            }
            Some(_) => {
                if self.flush_compound() {
                    self.combinators.push(Combinator::Descendant);
                }
                Ok(())
            }
        }
    }

    fn push_combinator(&mut self, combinator: Combinator) -> Result<(), SelectorError> {
        if !self.flush_compound() {
            return Err(SelectorError::DanglingCombinator);
        }
        self.skip_whitespace();
        self.combinators.push(combinator);
        Ok(())
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    fn parse_attribute_selector(&mut self) -> Result<(), SelectorError> {
        self.skip_whitespace();
        let name = self.collect_ident();
        if name.is_empty() {
            return Err(SelectorError::MalformedAttribute);
        }
        self.skip_whitespace();

        let selector = match self.chars.peek() {
            Some(']') => {
                let _ = self.chars.next();
                AttributeSelector::Exists(name)
            }
            Some('=') => {
                let _ = self.chars.next();
                let value = self.parse_attribute_value()?;
                self.expect_bracket_close()?;
                AttributeSelector::Equals(name, value)
            }
            Some(&op @ ('~' | '|' | '^' | '$' | '*')) => {
                let _ = self.chars.next();
                if self.chars.next() != Some('=') {
                    return Err(SelectorError::MalformedAttribute);
                }
                let value = self.parse_attribute_value()?;
                self.expect_bracket_close()?;
                match op {
                    '~' => AttributeSelector::Includes(name, value),
                    '|' => AttributeSelector::DashMatch(name, value),
                    '^' => AttributeSelector::PrefixMatch(name, value),
                    '$' => AttributeSelector::SuffixMatch(name, value),
                    _ => AttributeSelector::SubstringMatch(name, value),
                }
            }
            _ => return Err(SelectorError::MalformedAttribute),
        };
        self.compound.push(SimpleSelector::Attribute(selector));
        Ok(())
    }

    /// Parse the value of `[attr=value]`: quoted (either style) or a bare
    /// ident.
    fn parse_attribute_value(&mut self) -> Result<String, SelectorError> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some(&q @ ('"' | '\'')) => {
                let _ = self.chars.next();
                let mut value = String::new();
                for ch in self.chars.by_ref() {
                    if ch == q {
                        return Ok(value);
                    }
                    value.push(ch);
                }
                Err(SelectorError::MalformedAttribute)
            }
            Some(_) => {
                let mut value = String::new();
                while self
                    .chars
                    .peek()
                    .is_some_and(|&ch| is_ident_char(ch) || ch == '.' || ch == '/' || ch == ':')
                {
                    value.push(self.chars.next().unwrap_or_default());
                }
                if value.is_empty() {
                    Err(SelectorError::MalformedAttribute)
                } else {
                    Ok(value)
                }
            }
            None => Err(SelectorError::MalformedAttribute),
        }
    }

    fn expect_bracket_close(&mut self) -> Result<(), SelectorError> {
        self.skip_whitespace();
        if self.chars.next() == Some(']') {
            Ok(())
        } else {
            Err(SelectorError::MalformedAttribute)
        }
    }

    fn collect_ident(&mut self) -> String {
        let mut name = String::new();
        while self.chars.peek().is_some_and(|&ch| is_ident_char(ch)) {
            name.push(self.chars.next().unwrap_or_default());
        }
        name
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
            let _ = self.chars.next();
        }
    }

    /// Flush the pending identifier as a type selector.
    fn flush_ident(&mut self) {
        if !self.ident.is_empty() {
            self.compound
                .push(SimpleSelector::Type(std::mem::take(&mut self.ident)));
        }
    }

    /// Flush the pending compound selector. Returns whether a non-empty
    /// compound was produced.
    fn flush_compound(&mut self) -> bool {
        self.flush_ident();
        if self.compound.is_empty() {
            return false;
        }
        self.compounds.push(CompoundSelector {
            simple_selectors: std::mem::take(&mut self.compound),
        });
        true
    }

    /// Close out one comma-group member: build the complex selector from
    /// the collected compounds and the combinators between them.
    fn finish_group(&mut self) -> Result<(), SelectorError> {
        let _ = self.flush_compound();
        if self.compounds.is_empty() {
            if self.combinators.is_empty() {
                return Ok(());
            }
            return Err(SelectorError::DanglingCombinator);
        }
        if self.compounds.len() != self.combinators.len() + 1 {
            return Err(SelectorError::DanglingCombinator);
        }

        let mut compounds = std::mem::take(&mut self.compounds);
        let combinators = std::mem::take(&mut self.combinators);
        let Some(subject) = compounds.pop() else {
            return Err(SelectorError::Empty);
        };

        // Right-to-left: for "A > B C" the chain from subject C is
        // [(Descendant, B), (Child, A)].
        let chain: Vec<(Combinator, CompoundSelector)> = compounds
            .into_iter()
            .zip(combinators)
            .rev()
            .map(|(compound, combinator)| (combinator, compound))
            .collect();

        self.groups.push(ComplexSelector {
            subject,
            combinators: chain,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_chained_descendant_selector() {
        let selector = Selector::parse(".post-row div .post-user font").unwrap();
        assert_eq!(selector.selectors.len(), 1);
        let complex = &selector.selectors[0];
        assert_eq!(
            complex.subject.simple_selectors,
            vec![SimpleSelector::Type("font".to_string())]
        );
        assert_eq!(complex.combinators.len(), 3);
        assert!(complex
            .combinators
            .iter()
            .all(|(c, _)| *c == Combinator::Descendant));
    }

    #[test]
    fn parses_explicit_combinators() {
        let selector = Selector::parse("ul > li + li").unwrap();
        let complex = &selector.selectors[0];
        assert_eq!(complex.combinators[0].0, Combinator::NextSibling);
        assert_eq!(complex.combinators[1].0, Combinator::Child);
    }

    #[test]
    fn parses_comma_groups() {
        let selector = Selector::parse("b, i , u").unwrap();
        assert_eq!(selector.selectors.len(), 3);
    }

    #[test]
    fn parses_compound_with_id_class_and_attribute() {
        let selector = Selector::parse("a#x.btn[href^='https']").unwrap();
        let subject = &selector.selectors[0].subject;
        assert_eq!(subject.simple_selectors.len(), 4);
    }

    #[test]
    fn rejects_pseudo_classes() {
        assert_eq!(
            Selector::parse("li:first-child").unwrap_err(),
            SelectorError::Unsupported(':')
        );
    }

    #[test]
    fn rejects_dangling_combinator() {
        assert_eq!(
            Selector::parse("> div").unwrap_err(),
            SelectorError::DanglingCombinator
        );
    }

    #[test]
    fn rejects_empty_selector() {
        assert_eq!(Selector::parse("   ").unwrap_err(), SelectorError::Empty);
    }
}
