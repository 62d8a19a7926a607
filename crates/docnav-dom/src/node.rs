//! DOM Node - Arena representation
//!
//! Nodes link to each other through [`NodeId`] indices. Element data caches
//! the `id` and `class` attributes because selector matching reads them on
//! every lookup.

use crate::{ClassList, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: &str) -> Self {
        Self::new(NodeData::Element(ElementData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(NodeData::Text(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::new(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased local tag name
    pub name: String,
    /// Attributes in source order
    attrs: Vec<Attribute>,
    /// Cached id attribute
    id: Option<String>,
    /// Cached class list
    classes: ClassList,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: ClassList::new(),
        }
    }

    /// Tag name
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Cached `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Cached class list
    pub fn class_list(&self) -> &ClassList {
        &self.classes
    }

    /// Iterate over attributes
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute, refreshing the id/class caches
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name.to_ascii_lowercase().as_str() {
            "id" => self.id = Some(value.clone()),
            "class" => self.classes = ClassList::parse(&value),
            _ => {}
        }
        self.write_attr(name, value);
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(name))?;
        match name.to_ascii_lowercase().as_str() {
            "id" => self.id = None,
            "class" => self.classes = ClassList::new(),
            _ => {}
        }
        Some(self.attrs.remove(pos).value)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class, keeping the `class` attribute in sync
    pub fn add_class(&mut self, class: &str) {
        if self.classes.insert(class) {
            self.sync_class_attr();
        }
    }

    /// Remove a class, keeping the `class` attribute in sync
    pub fn remove_class(&mut self, class: &str) {
        if self.classes.remove(class) {
            self.sync_class_attr();
        }
    }

    fn sync_class_attr(&mut self) {
        let value = self.classes.to_string();
        self.write_attr("class", value);
    }

    fn write_attr(&mut self, name: &str, value: String) {
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            attr.value = value;
        } else {
            self.attrs.push(Attribute { name: name.to_string(), value });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_name_lowercased() {
        let elem = ElementData::new("DIV");
        assert_eq!(elem.tag_name(), "div");
    }

    #[test]
    fn test_id_and_class_cached() {
        let mut elem = ElementData::new("div");
        elem.set_attr("id", "content");
        elem.set_attr("class", "main wide");

        assert_eq!(elem.id(), Some("content"));
        assert!(elem.has_class("main"));
        assert!(elem.has_class("wide"));

        elem.remove_attr("class");
        assert!(!elem.has_class("main"));
    }

    #[test]
    fn test_class_mutation_updates_attribute() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "main");
        elem.add_class("page-transitioning-out");
        assert_eq!(elem.get_attr("class"), Some("main page-transitioning-out"));

        elem.remove_class("page-transitioning-out");
        assert_eq!(elem.get_attr("class"), Some("main"));
        assert_eq!(elem.attrs().count(), 1);
    }

    #[test]
    fn test_attribute_names_case_insensitive() {
        let mut elem = ElementData::new("a");
        elem.set_attr("HREF", "/guide/");
        assert_eq!(elem.get_attr("href"), Some("/guide/"));
        elem.set_attr("href", "/other/");
        assert_eq!(elem.attrs().count(), 1);
    }
}
