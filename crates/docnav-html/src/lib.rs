//! docnav HTML
//!
//! HTML5 parsing built on html5ever, converted into the docnav arena DOM,
//! plus innerHTML/outerHTML serialization.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, inner_html, outer_html};
pub use docnav_dom::{Document, DomTree, Node, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string with a base URL
pub fn parse_with_url(html: &str, url: &str) -> Document {
    HtmlParser::new().parse_with_url(html, url)
}
