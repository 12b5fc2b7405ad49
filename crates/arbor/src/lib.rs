//! Arbor
//!
//! Parse HTML into an arena tree, navigate and rewrite it, and query it with
//! CSS selectors.
//!
//! # Example
//! ```rust
//! use arbor::{Document, Position};
//!
//! let mut doc = Document::parse(r#"<ul><li id="a">one</li></ul>"#)?;
//! let first = doc.get_element_by_id("a").unwrap();
//! doc.insert_adjacent_html(Position::AfterEnd, first, "<li>two</li>")?;
//!
//! let items = doc.query_selector_all("ul > li")?;
//! assert_eq!(items.len(), 2);
//! assert_eq!(doc.outer_html(items.last().unwrap()), "<li>two</li>");
//! # Ok::<(), arbor::Error>(())
//! ```

mod config;
mod document;
mod error;

pub use config::DocumentOptions;
pub use document::Document;
pub use error::{Error, Result};

pub use arbor_dom::{Collection, DomTree, NodeId, NodeKind, Position};
pub use arbor_select::{CacheConfig, SelectorCache};

// Re-export sub-crates for advanced usage
pub use arbor_dom as dom;
pub use arbor_html as html;
pub use arbor_select as select;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
