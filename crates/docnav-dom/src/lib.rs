//! docnav DOM - Document Object Model
//!
//! Arena-backed DOM tree shared by the live page and by fetched documents.
//! Nodes are addressed by [`NodeId`] indices instead of pointers, so a whole
//! document can be moved, cloned or dropped as a single value.

mod node;
mod tree;
mod document;
mod selector;
mod classlist;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::Document;
pub use selector::{Selector, SelectorError};
pub use classlist::ClassList;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
