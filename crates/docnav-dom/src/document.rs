//! Document - High-level document API

use crate::{DomTree, NodeData, NodeId, Selector, SelectorError};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure); call [`Document::finalize`]
    /// once the tree has been populated.
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate the html, head and body elements after building the tree
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.find_child_element(root, "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self.find_child_element(self.html_element, "head").unwrap_or(NodeId::NONE);
            self.body_element = self.find_child_element(self.html_element, "body").unwrap_or(NodeId::NONE);
        }
    }

    fn find_child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree.children(parent)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.tag_name() == tag))
            .map(|(id, _)| id)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Update the document URL (after a history push)
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    fn title_element(&self) -> Option<NodeId> {
        self.tree.descendants(self.tree.root())
            .find(|&id| self.tree.element(id).is_some_and(|e| e.tag_name() == "title"))
    }

    /// Document title with whitespace stripped and collapsed
    pub fn title(&self) -> String {
        self.title_element()
            .map(|id| {
                self.tree.text_content(id)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    /// Replace the title text, creating a `<title>` in `<head>` when missing
    pub fn set_title(&mut self, title: &str) {
        let element = match self.title_element() {
            Some(id) => id,
            None => {
                if !self.head_element.is_valid() {
                    tracing::debug!("No <head> in {}, title not set", self.url);
                    return;
                }
                let id = self.tree.create_element("title");
                self.tree.append_child(self.head_element, id);
                id
            }
        };
        self.tree.remove_children(element);
        let text = self.tree.create_text(title);
        self.tree.append_child(element, text);
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First element matching a selector string
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.tree.query_selector(self.tree.root(), &selector))
    }

    /// All elements matching a selector string
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.tree.query_selector_all(self.tree.root(), &selector))
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root())
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// Whether a doctype node sits directly under the document
    pub fn has_doctype(&self) -> bool {
        self.tree.children(self.tree.root())
            .any(|(_, node)| matches!(node.data, NodeData::Doctype { .. }))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_skeleton() {
        let doc = Document::new("https://docs.example.com/");
        assert!(doc.document_element().is_valid());
        assert!(doc.head().is_valid());
        assert!(doc.body().is_valid());
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_set_title_creates_element() {
        let mut doc = Document::new("about:blank");
        doc.set_title("Install");
        assert_eq!(doc.title(), "Install");

        doc.set_title("Guide");
        assert_eq!(doc.title(), "Guide");
        assert_eq!(doc.query_selector_all("title").unwrap().len(), 1);
    }

    #[test]
    fn test_title_collapses_whitespace() {
        let mut doc = Document::new("about:blank");
        doc.set_title("  Plugin \n  SDK   Docs ");
        assert_eq!(doc.title(), "Plugin SDK Docs");
    }

    #[test]
    fn test_query_by_id_and_class() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();
        let main = tree.create_element("div");
        tree.element_mut(main).unwrap().set_attr("id", "content");
        tree.element_mut(main).unwrap().set_attr("class", "main");
        tree.append_child(body, main);

        assert_eq!(doc.get_element_by_id("content"), Some(main));
        assert_eq!(doc.query_selector(".main").unwrap(), Some(main));
        assert!(doc.query_selector("div span").is_err());
    }
}
