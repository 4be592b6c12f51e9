//! The document facade: load markup from a string, file, or URL, then
//! query and rewrite the resulting tree.
//!
//! The facade holds the parsed [`Document`] and exposes the query surface
//! (`find`, `get_element_by_id`, `get_elements_by_tag`,
//! `get_elements_by_class`) plus serialization. Query results are
//! [`NodeId`]s; read them back through the pass-through accessors here or
//! drop down to [`Dom::document`]/[`Dom::document_mut`] for the full tree
//! API. Every query operates on current tree state, so prior mutations are
//! reflected immediately.

use magpie_common::net;
use magpie_dom::{Document, NodeId};
use magpie_html::{Options, Parser};
use magpie_select::{
    query, ComplexSelector, CompoundSelector, Selector, SimpleSelector,
};
use std::path::Path;

use crate::error::Error;

/// A lazily loaded HTML document.
///
/// Construct one empty and feed it with `load_str`/`load_from_file`/
/// `load_from_url`; queries before the first successful load fail with
/// [`Error::NotLoaded`].
#[derive(Debug, Default)]
pub struct Dom {
    document: Option<Document>,
    options: Options,
}

impl Dom {
    /// An empty facade with default options; nothing is loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty facade that will parse with the given options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            document: None,
            options,
        }
    }

    /// Replace the parse options used by subsequent loads.
    pub fn set_options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Parse a markup string into a fresh facade.
    ///
    /// # Errors
    ///
    /// See [`Dom::load_str`].
    pub fn parse(html: &str, options: Options) -> Result<Self, Error> {
        let mut dom = Self::with_options(options);
        let _ = dom.load_str(html)?;
        Ok(dom)
    }

    /// Parse a markup string, replacing any previously loaded document.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] on empty input, an exceeded depth bound, or a
    /// strict-mode violation. Malformed markup parses tolerantly.
    pub fn load_str(&mut self, html: &str) -> Result<&mut Self, Error> {
        let document = Parser::new(&self.options).parse(html)?;
        self.document = Some(document);
        Ok(self)
    }

    /// Read a file and parse its content.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] when the file cannot be read, otherwise as
    /// [`Dom::load_str`].
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, Error> {
        let content = net::load_file(path)?;
        self.load_str(&content)
    }

    /// Fetch a URL and parse the response body.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] when the request fails, otherwise as
    /// [`Dom::load_str`].
    pub fn load_from_url(&mut self, url: &str) -> Result<&mut Self, Error> {
        let content = net::fetch_text(url)?;
        self.load_str(&content)
    }

    /// Fetch a URL on a caller-supplied HTTP client and parse the response
    /// body.
    ///
    /// # Errors
    ///
    /// As [`Dom::load_from_url`].
    pub fn load_from_url_with_client(
        &mut self,
        url: &str,
        client: &net::HttpClient,
    ) -> Result<&mut Self, Error> {
        let content = net::fetch_text_with_client(url, client)?;
        self.load_str(&content)
    }

    /// The loaded document.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before the first successful load.
    pub fn document(&self) -> Result<&Document, Error> {
        self.document.as_ref().ok_or(Error::NotLoaded)
    }

    /// Mutable access to the loaded document, for structural rewrites.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before the first successful load.
    pub fn document_mut(&mut self) -> Result<&mut Document, Error> {
        self.document.as_mut().ok_or(Error::NotLoaded)
    }

    // ========== queries ==========

    /// Every element matching the selector, in document order.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load, [`Error::Selector`] for a
    /// selector the grammar does not cover.
    pub fn find(&self, selector: &str) -> Result<Vec<NodeId>, Error> {
        let doc = self.document()?;
        let selector = Selector::parse(selector)?;
        Ok(query(doc, NodeId::ROOT, &selector))
    }

    /// The match at `index` among every element matching the selector.
    ///
    /// # Errors
    ///
    /// As [`Dom::find`], plus [`Error::IndexNotFound`] when fewer than
    /// `index + 1` elements match — an explicit failure, never a silent
    /// out-of-range read.
    pub fn find_one(&self, selector: &str, index: usize) -> Result<NodeId, Error> {
        self.find(selector)?
            .get(index)
            .copied()
            .ok_or(Error::IndexNotFound(index))
    }

    /// Every element matching the selector below `origin` only.
    ///
    /// # Errors
    ///
    /// As [`Dom::find`].
    pub fn find_within(&self, origin: NodeId, selector: &str) -> Result<Vec<NodeId>, Error> {
        let doc = self.document()?;
        let selector = Selector::parse(selector)?;
        Ok(query(doc, origin, &selector))
    }

    /// The first element whose `id` attribute equals `id`, if any.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load.
    pub fn get_element_by_id(&self, id: &str) -> Result<Option<NodeId>, Error> {
        let doc = self.document()?;
        let selector = single(SimpleSelector::Id(id.to_string()));
        Ok(query(doc, NodeId::ROOT, &selector).into_iter().next())
    }

    /// Every element with the given tag name, in document order.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load.
    pub fn get_elements_by_tag(&self, name: &str) -> Result<Vec<NodeId>, Error> {
        let doc = self.document()?;
        let selector = single(SimpleSelector::Type(name.to_string()));
        Ok(query(doc, NodeId::ROOT, &selector))
    }

    /// Every element carrying the given class, in document order.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load.
    pub fn get_elements_by_class(&self, class: &str) -> Result<Vec<NodeId>, Error> {
        let doc = self.document()?;
        let selector = single(SimpleSelector::Class(class.to_string()));
        Ok(query(doc, NodeId::ROOT, &selector))
    }

    /// The first top-level node of the document.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load, [`Error::Dom`] when the
    /// document is empty.
    pub fn first_child(&self) -> Result<NodeId, Error> {
        Ok(self.document()?.first_child(NodeId::ROOT)?)
    }

    /// The last top-level node of the document.
    ///
    /// # Errors
    ///
    /// As [`Dom::first_child`].
    pub fn last_child(&self) -> Result<NodeId, Error> {
        Ok(self.document()?.last_child(NodeId::ROOT)?)
    }

    // ========== serialization ==========

    /// The whole document rendered back to markup.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load, [`Error::Dom`] when the tree
    /// holds a non-content node below an element.
    pub fn inner_html(&self) -> Result<String, Error> {
        Ok(self.document()?.inner_html(NodeId::ROOT)?)
    }

    /// Alias of [`Dom::inner_html`] at the document level: the synthetic
    /// root contributes no markup of its own.
    ///
    /// # Errors
    ///
    /// As [`Dom::inner_html`].
    pub fn outer_html(&self) -> Result<String, Error> {
        Ok(self.document()?.outer_html(NodeId::ROOT)?)
    }

    /// The markup of one node.
    ///
    /// # Errors
    ///
    /// As [`Dom::inner_html`].
    pub fn outer_html_of(&self, id: NodeId) -> Result<String, Error> {
        Ok(self.document()?.outer_html(id)?)
    }

    /// The markup of one node's contents.
    ///
    /// # Errors
    ///
    /// As [`Dom::inner_html`].
    pub fn inner_html_of(&self, id: NodeId) -> Result<String, Error> {
        Ok(self.document()?.inner_html(id)?)
    }

    /// The direct text of one node.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load.
    pub fn text_of(&self, id: NodeId) -> Result<String, Error> {
        Ok(self.document()?.text(id))
    }

    /// All text under one node, document order.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load.
    pub fn text_deep_of(&self, id: NodeId) -> Result<String, Error> {
        Ok(self.document()?.text_deep(id))
    }

    /// One attribute value of one node (`None` when absent or bare).
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] before a load.
    pub fn attribute_of(&self, id: NodeId, name: &str) -> Result<Option<String>, Error> {
        Ok(self.document()?.attribute(id, name))
    }
}

/// A selector group holding exactly one simple selector.
fn single(simple: SimpleSelector) -> Selector {
    Selector {
        selectors: vec![ComplexSelector {
            subject: CompoundSelector {
                simple_selectors: vec![simple],
            },
            combinators: Vec::new(),
        }],
    }
}
