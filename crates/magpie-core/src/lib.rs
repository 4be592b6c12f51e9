//! Document facade and registry for the Magpie HTML toolkit.
//!
//! This crate ties the workspace together: [`Dom`] loads markup from a
//! string, file, or URL (via `magpie-common`), parses it tolerantly (via
//! `magpie-html`) into an arena tree (`magpie-dom`), and answers selector
//! queries (`magpie-select`). [`DomRegistry`] shares named instances
//! across a host program without any process-global state.
//!
//! ```no_run
//! use magpie_core::Dom;
//!
//! let mut dom = Dom::new();
//! dom.load_str("<div class=\"all\"><p>Hey bro</p></div>")?;
//! let p = dom.find_one("p", 0)?;
//! assert_eq!(dom.text_of(p)?, "Hey bro");
//! # Ok::<(), magpie_core::Error>(())
//! ```

pub mod dom;
pub mod error;
pub mod registry;

pub use dom::Dom;
pub use error::Error;
pub use registry::DomRegistry;
