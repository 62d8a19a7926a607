//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the docnav arena DOM.
//! html5ever recovers from any malformed input, so parsing never fails.

use docnav_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {} ({} bytes)", url, html.len());

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                let id = tree.create_doctype(name, public_id, system_id);
                tree.append_child(parent, id);
            }
            RcNodeData::Text { contents } => {
                // Whitespace is kept: <pre> blocks in doc pages depend on it
                let id = tree.create_text(&contents.borrow());
                tree.append_child(parent, id);
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(elem) = tree.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attr(&attr.name.local, attr.value.to_string());
                    }
                }
                tree.append_child(parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
        assert!(doc.body().is_valid());
    }

    #[test]
    fn test_parse_fragment_gets_skeleton() {
        let doc = HtmlParser::new().parse("<div class=\"main\"><span>Text</span></div>");

        // Fragments get wrapped in html/head/body by html5ever
        assert!(doc.head().is_valid());
        assert!(doc.query_selector(".main").unwrap().is_some());
    }

    #[test]
    fn test_parse_keeps_url() {
        let doc = HtmlParser::new().parse_with_url("<p>x</p>", "https://docs.example.com/a.html");
        assert_eq!(doc.url(), "https://docs.example.com/a.html");
    }
}
