//! Class lists
//!
//! Ordered, duplicate-free set of class names mirrored from an element's
//! `class` attribute. Transition markers are toggled through it.

use std::fmt;

/// Classes of one element, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a `class` attribute value on ASCII whitespace
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        for class in value.split_ascii_whitespace() {
            list.insert(class);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Returns false when `class` was already present or is empty
    pub fn insert(&mut self, class: &str) -> bool {
        if class.is_empty() || self.contains(class) {
            return false;
        }
        self.0.push(class.to_string());
        true
    }

    /// Returns false when `class` was absent
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != class);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
