//! Element Query
//!
//! querySelector, querySelectorAll, closest and matches over compound
//! selectors: `tag`, `*`, `.class`, `#id`, `[attr]` and their combinations
//! (`a[href]`, `div.main#content`), optionally joined into a `,` list.
//! Combinators are not supported.

use std::str::FromStr;

use crate::{DomTree, ElementData, NodeId};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {ch:?} at {pos} in selector {selector:?}")]
    UnexpectedChar { selector: String, ch: char, pos: usize },

    #[error("unsupported selector syntax {selector:?}: {reason}")]
    Unsupported { selector: String, reason: &'static str },
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

/// One compound selector, e.g. `a.nav[href]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<String>,
}

impl Compound {
    fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !elem.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| elem.has_class(c))
            && self.attrs.iter().all(|a| elem.has_attr(a))
    }
}

impl Selector {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let alternatives = input
            .split(',')
            .map(|part| parse_compound(input, part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }

    /// Check a single element against the selector
    pub fn matches(&self, elem: &ElementData) -> bool {
        self.alternatives.iter().any(|c| c.matches(elem))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(full: &str, part: &str) -> Result<Compound, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::Empty);
    }

    let chars: Vec<char> = part.chars().collect();
    let mut compound = Compound::default();
    let mut pos = 0;

    let read_ident = |pos: &mut usize| -> String {
        let start = *pos;
        while *pos < chars.len() && is_ident_char(chars[*pos]) {
            *pos += 1;
        }
        chars[start..*pos].iter().collect()
    };

    if chars[0] == '*' {
        pos = 1;
    } else if is_ident_char(chars[0]) {
        compound.tag = Some(read_ident(&mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        let ch = chars[pos];
        match ch {
            '.' | '#' => {
                pos += 1;
                let ident = read_ident(&mut pos);
                if ident.is_empty() {
                    return Err(SelectorError::UnexpectedChar { selector: full.to_string(), ch, pos: pos - 1 });
                }
                if ch == '.' {
                    compound.classes.push(ident);
                } else {
                    compound.id = Some(ident);
                }
            }
            '[' => {
                pos += 1;
                let ident = read_ident(&mut pos);
                if ident.is_empty() || pos >= chars.len() {
                    return Err(SelectorError::UnexpectedChar { selector: full.to_string(), ch, pos: pos.saturating_sub(1) });
                }
                if chars[pos] != ']' {
                    return Err(SelectorError::Unsupported {
                        selector: full.to_string(),
                        reason: "only attribute presence selectors are supported",
                    });
                }
                pos += 1;
                compound.attrs.push(ident.to_ascii_lowercase());
            }
            c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err(SelectorError::Unsupported {
                    selector: full.to_string(),
                    reason: "combinators are not supported",
                });
            }
            _ => {
                return Err(SelectorError::UnexpectedChar { selector: full.to_string(), ch, pos });
            }
        }
    }

    Ok(compound)
}

impl DomTree {
    /// Check if the node at `id` is an element matching `selector`
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|e| selector.matches(e))
    }

    /// First matching descendant of `scope` in document order
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope).find(|&id| self.matches(id, selector))
    }

    /// All matching descendants of `scope` in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope).filter(|&id| self.matches(id, selector)).collect()
    }

    /// Nearest inclusive ancestor of `id` matching `selector`
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        if self.matches(id, selector) {
            return Some(id);
        }
        self.ancestors(id).find(|&a| self.matches(a, selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elem(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut e = ElementData::new(tag);
        for (k, v) in attrs {
            e.set_attr(k, *v);
        }
        e
    }

    #[test]
    fn test_parse_simple() {
        assert!(Selector::parse("div").is_ok());
        assert!(Selector::parse(".main").is_ok());
        assert!(Selector::parse("#content").is_ok());
        assert!(Selector::parse("*").is_ok());
        assert!(Selector::parse("a[href]").is_ok());
        assert!(Selector::parse(".toc-tree, .sidebar-tree").is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert!(matches!(Selector::parse("div p"), Err(SelectorError::Unsupported { .. })));
        assert!(matches!(Selector::parse("a[href=x]"), Err(SelectorError::Unsupported { .. })));
        assert!(matches!(Selector::parse("div."), Err(SelectorError::UnexpectedChar { .. })));
        assert!(matches!(Selector::parse("a,"), Err(SelectorError::Empty)));
    }

    #[test]
    fn test_compound_matching() {
        let link = elem("a", &[("href", "/guide/"), ("class", "reference internal")]);
        let anchor = elem("a", &[("name", "top")]);

        let sel = Selector::parse("a[href]").unwrap();
        assert!(sel.matches(&link));
        assert!(!sel.matches(&anchor));

        let sel = Selector::parse("a.reference.internal").unwrap();
        assert!(sel.matches(&link));

        let sel = Selector::parse("div.reference").unwrap();
        assert!(!sel.matches(&link));
    }

    #[test]
    fn test_selector_list() {
        let toc = elem("div", &[("class", "toc-tree")]);
        let sel: Selector = ".sidebar-tree, .toc-tree".parse().unwrap();
        assert!(sel.matches(&toc));
    }

    #[test]
    fn test_closest_is_inclusive() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        tree.element_mut(a).unwrap().set_attr("href", "/x");
        let span = tree.create_element("span");
        tree.append_child(tree.root(), a);
        tree.append_child(a, span);

        let sel = Selector::parse("a[href]").unwrap();
        assert_eq!(tree.closest(span, &sel), Some(a));
        assert_eq!(tree.closest(a, &sel), Some(a));
        assert_eq!(tree.closest(tree.root(), &sel), None);
    }
}
