//! Tolerant tree-building parser.
//!
//! The parser walks the scanner through `Text → TagOpen → (TagName →
//! Attributes → (SelfClose | TagClose)) → Text`, with side branches for
//! comments, doctypes, CDATA sections, and processing instructions, each
//! consumed verbatim to their closing delimiter (or to end of input when
//! unterminated — never an error).
//!
//! Recovery rules, applied unless `strict` is set:
//! - an end tag with no matching open element is dropped;
//! - elements left open are auto-closed when an ancestor's end tag or the
//!   end of input arrives;
//! - a `<` that opens no real tag is re-treated as text.

use magpie_common::encoding::{Passthrough, Transcoder};
use magpie_common::warning::warn_once;
use magpie_dom::{decode_entities, AttributeQuote, Document, NodeId, Tag};

use crate::content::Content;
use crate::error::ParseError;
use crate::options::Options;
use crate::token::StringToken;
use crate::cleanup;

/// Parse markup into a [`Document`] with the given options.
///
/// # Errors
///
/// [`ParseError::ContentLengthEmpty`] for empty input,
/// [`ParseError::DepthExceeded`] when a configured nesting bound is hit,
/// [`ParseError::StrictViolation`] in strict mode. Malformed markup is
/// recovered from, not reported.
pub fn parse_str(html: &str, options: &Options) -> Result<Document, ParseError> {
    Parser::new(options).parse(html)
}

/// The tree builder: consumes a [`Content`] scanner and produces a
/// [`Document`].
pub struct Parser<'a> {
    options: &'a Options,
}

impl<'a> Parser<'a> {
    /// Create a parser reading the given options. The options are read for
    /// the whole parse; they cannot change mid-stream.
    #[must_use]
    pub const fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Parse markup with the identity transcoder.
    ///
    /// # Errors
    ///
    /// See [`parse_str`].
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_transcoder(html, &Passthrough)
    }

    /// Parse markup, applying `transcoder` to every text run as its node is
    /// materialized.
    ///
    /// # Errors
    ///
    /// See [`parse_str`], plus [`ParseError::Transcode`] when the
    /// transcoder rejects a text run.
    pub fn parse_with_transcoder(
        &self,
        html: &str,
        transcoder: &dyn Transcoder,
    ) -> Result<Document, ParseError> {
        if html.is_empty() {
            return Err(ParseError::ContentLengthEmpty);
        }
        let cleaned = cleanup::clean(html, self.options);
        let mut builder = TreeBuilder {
            doc: Document::new(),
            active: NodeId::ROOT,
            content: Content::new(&cleaned),
            options: self.options,
            transcoder,
        };
        builder.build()?;
        Ok(builder.doc)
    }
}

/// What one `<…>` scan produced.
enum TagEvent {
    /// An element was opened; descend into it.
    Opened(NodeId),
    /// A self-closing element or verbatim node was attached; stay put.
    Attached,
    /// An end tag for the named element.
    Closing(String),
    /// Tolerated garbage; nothing was added.
    Nothing,
}

struct TreeBuilder<'a> {
    doc: Document,
    active: NodeId,
    content: Content,
    options: &'a Options,
    transcoder: &'a dyn Transcoder,
}

impl TreeBuilder<'_> {
    fn build(&mut self) -> Result<(), ParseError> {
        loop {
            let text = self.copy_text();
            if !text.is_empty() {
                self.append_text(&text)?;
                continue;
            }
            if self.content.is_at_end() {
                break;
            }
            match self.parse_tag()? {
                TagEvent::Opened(id) => {
                    self.enforce_depth(id)?;
                    self.active = id;
                }
                TagEvent::Closing(name) => self.close_tag(&name)?,
                TagEvent::Attached | TagEvent::Nothing => {}
            }
        }
        Ok(())
    }

    /// Copy the text run in front of the cursor. Inside a raw-text element
    /// (`script`/`style` that survived cleanup) everything up to the next
    /// `</` belongs to the element.
    fn copy_text(&mut self) -> String {
        let raw_text = self
            .doc
            .tag(self.active)
            .is_some_and(|tag| tag.name() == "script" || tag.name() == "style");
        if raw_text {
            self.content.copy_until("</", false, false)
        } else {
            self.content.copy_until("<", false, false)
        }
    }

    fn append_text(&mut self, raw: &str) -> Result<(), ParseError> {
        if !self.options.whitespace_text_node && raw.trim().is_empty() {
            return Ok(());
        }
        let mut text = if self.options.remove_double_space {
            collapse_whitespace(raw)
        } else {
            raw.to_string()
        };
        if self.options.html_special_chars_decode {
            text = decode_entities(&text);
        }
        let text = self.transcoder.transcode(&text)?;
        let node = self.doc.create_text(&text);
        let _ = self.doc.add_child(self.active, node)?;
        Ok(())
    }

    /// Scan one `<…>` construct. The cursor sits on the `<`.
    fn parse_tag(&mut self) -> Result<TagEvent, ParseError> {
        self.content.fast_forward(1);

        match self.content.peek() {
            // lone '<' at end of input: just text
            None => {
                self.append_text("<")?;
                return Ok(TagEvent::Nothing);
            }
            Some('/') => return self.scan_end_tag(),
            Some('?') => return self.attach_verbatim("?>"),
            _ => {}
        }

        if self.content.starts_with("!--") {
            return self.attach_verbatim("-->");
        }
        if self.content.starts_with("![CDATA[") {
            return self.attach_verbatim("]]>");
        }
        if self.content.peek() == Some('!') {
            // doctype or other markup declaration
            return self.attach_verbatim(">");
        }

        self.scan_start_tag()
    }

    /// Consume a comment/doctype/CDATA/processing-instruction through its
    /// closing delimiter (or end of input) and keep it verbatim.
    fn attach_verbatim(&mut self, closing: &str) -> Result<TagEvent, ParseError> {
        self.content.rewind(1);
        let mut raw = self.content.copy_until(closing, false, false);
        if !self.content.is_at_end() {
            self.content.fast_forward(closing.chars().count());
            raw.push_str(closing);
        }
        let node = self.doc.create_comment(&raw);
        let _ = self.doc.add_child(self.active, node)?;
        Ok(TagEvent::Attached)
    }

    fn scan_end_tag(&mut self) -> Result<TagEvent, ParseError> {
        self.content.fast_forward(1);
        let name = self
            .content
            .copy_by_token(StringToken::Slash, false)
            .trim()
            .to_ascii_lowercase();
        // discard anything else up to the closing bracket
        let _ = self.content.copy_until(">", false, false);
        self.content.fast_forward(1);
        if name.is_empty() {
            warn_once("parser", "dropping end tag with no name");
            return Ok(TagEvent::Nothing);
        }
        Ok(TagEvent::Closing(name))
    }

    fn scan_start_tag(&mut self) -> Result<TagEvent, ParseError> {
        // a tag name must open with an alphanumeric; anything else means
        // the '<' was plain text
        let opens_tag = self
            .content
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric());
        if !opens_tag {
            self.append_text("<")?;
            return Ok(TagEvent::Nothing);
        }
        let name = self.content.copy_by_token(StringToken::Slash, false);

        let mut tag = Tag::new(&name);
        let mut explicit_self_close = false;

        loop {
            let _ = self.content.skip_by_token(StringToken::Blank);
            match self.content.peek() {
                // end of input inside a tag: auto-close it
                None => break,
                Some('>') => {
                    self.content.fast_forward(1);
                    break;
                }
                Some('/') => {
                    if self.content.peek_at(1) == Some('>') {
                        explicit_self_close = true;
                        self.content.fast_forward(2);
                        break;
                    }
                    self.content.fast_forward(1);
                    continue;
                }
                Some(_) => {}
            }

            let attr_name = self.content.copy_by_token(StringToken::Equal, false);
            if attr_name.is_empty() {
                // stray character where an attribute name should be
                self.content.fast_forward(1);
                continue;
            }
            let _ = self.content.skip_by_token(StringToken::Blank);
            if self.content.peek() != Some('=') {
                tag.set_attribute(&attr_name, None, AttributeQuote::Double);
                continue;
            }
            self.content.fast_forward(1);
            let _ = self.content.skip_by_token(StringToken::Blank);
            match self.content.peek() {
                Some('"') => {
                    self.content.fast_forward(1);
                    let value = self.content.copy_until("\"", false, true);
                    self.content.fast_forward(1);
                    tag.set_attribute(&attr_name, Some(&value), AttributeQuote::Double);
                }
                Some('\'') => {
                    self.content.fast_forward(1);
                    let value = self.content.copy_until("'", false, true);
                    self.content.fast_forward(1);
                    tag.set_attribute(&attr_name, Some(&value), AttributeQuote::Single);
                }
                _ => {
                    let value = self.content.copy_by_token(StringToken::Attr, false);
                    tag.set_attribute(&attr_name, Some(&value), AttributeQuote::None);
                }
            }
        }

        if explicit_self_close || self.options.is_self_closing(tag.name()) {
            let _ = tag.self_closing();
            let node = self.doc.create_element(tag);
            let _ = self.doc.add_child(self.active, node)?;
            return Ok(TagEvent::Attached);
        }

        let node = self.doc.create_element(tag);
        let _ = self.doc.add_child(self.active, node)?;
        Ok(TagEvent::Opened(node))
    }

    /// Resolve an end tag against the chain of open elements. A match
    /// auto-closes everything below it; no match drops the end tag.
    fn close_tag(&mut self, name: &str) -> Result<(), ParseError> {
        let mut cursor = Some(self.active);
        let mut found = None;
        while let Some(id) = cursor {
            if id == NodeId::ROOT {
                break;
            }
            if self.doc.tag(id).is_some_and(|tag| tag.name() == name) {
                found = Some(id);
                break;
            }
            cursor = self.doc.parent(id);
        }

        match found {
            Some(id) => {
                if id != self.active {
                    let unclosed = self
                        .doc
                        .tag(self.active)
                        .map_or_else(|| "?".to_string(), |tag| tag.name().to_string());
                    if self.options.strict {
                        return Err(ParseError::StrictViolation(format!(
                            "unclosed element <{unclosed}> auto-closed by </{name}>"
                        )));
                    }
                    warn_once(
                        "parser",
                        &format!("auto-closing <{unclosed}> at </{name}>"),
                    );
                }
                self.active = self.doc.parent(id).unwrap_or(NodeId::ROOT);
            }
            None => {
                if self.options.strict {
                    return Err(ParseError::StrictViolation(format!(
                        "end tag </{name}> matches no open element"
                    )));
                }
                warn_once(
                    "parser",
                    &format!("dropping end tag </{name}> that matches no open element"),
                );
            }
        }
        Ok(())
    }

    fn enforce_depth(&self, id: NodeId) -> Result<(), ParseError> {
        let Some(max) = self.options.max_depth else {
            return Ok(());
        };
        if self.doc.ancestors(id).count() > max {
            return Err(ParseError::DepthExceeded(max));
        }
        Ok(())
    }
}

/// Collapse every run of whitespace to a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_keeps_single_spaces() {
        assert_eq!(collapse_whitespace("Hey bro, "), "Hey bro, ");
        assert_eq!(collapse_whitespace("  aa=  \t "), " aa= ");
    }
}
