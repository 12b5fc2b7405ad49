//! Arbor HTML
//!
//! HTML5 parsing built on html5ever, converting into an arena
//! [`arbor_dom::DomTree`], and serialization back to markup. Both halves
//! implement the collaborator traits from [`arbor_dom::markup`].

mod error;
mod parser;
mod serializer;

pub use error::{ParseError, ParseResult};
pub use parser::{HtmlParser, ParseOptions};
pub use serializer::{HtmlSerializer, SerializeOptions, inner_html, outer_html};

use arbor_dom::DomTree;

/// Parse an HTML document with default options
pub fn parse(html: &str) -> ParseResult<DomTree> {
    HtmlParser::new().parse(html)
}
