//! HTML Serialization (innerHTML/outerHTML)
//!
//! Serializes DOM nodes back to HTML strings with escaping and void element
//! handling.

use docnav_dom::{DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone, Default)]
pub struct HtmlSerializer;

/// Void elements (self-closing, no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output);
        output
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output);
            }
            NodeData::Element(elem) => {
                let tag = elem.tag_name();

                output.push('<');
                output.push_str(tag);
                for attr in elem.attrs() {
                    output.push(' ');
                    output.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }
                output.push('>');

                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }

                if RAW_TEXT_ELEMENTS.contains(&tag) {
                    for (_, child) in tree.children(node_id) {
                        if let Some(text) = child.as_text() {
                            output.push_str(text);
                        }
                    }
                } else {
                    self.serialize_children(tree, node_id, output);
                }

                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(text, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                output.push('>');
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output);
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// innerHTML of an element
pub fn inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// outerHTML of an element
pub fn outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        let mut output = String::new();
        escape_text("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; \"friends\"");
    }

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("a<b & \"c\"", &mut output);
        assert_eq!(output, "a<b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_void_elements() {
        assert!(VOID_ELEMENTS.contains(&"br"));
        assert!(VOID_ELEMENTS.contains(&"img"));
        assert!(!VOID_ELEMENTS.contains(&"div"));
    }

    #[test]
    fn test_serialize_built_tree() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.element_mut(div).unwrap().set_attr("class", "main");
        let br = tree.create_element("br");
        let text = tree.create_text("1 < 2");
        tree.append_child(tree.root(), div);
        tree.append_child(div, text);
        tree.append_child(div, br);

        assert_eq!(outer_html(&tree, div), "<div class=\"main\">1 &lt; 2<br></div>");
        assert_eq!(inner_html(&tree, div), "1 &lt; 2<br>");
    }
}
