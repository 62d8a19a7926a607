//! DOM Tree (arena-based allocation)
//!
//! [`DomTree::detach`] keeps a subtree alive so it can be re-appended.
//! [`DomTree::remove`] and [`DomTree::remove_children`] drop the subtree and
//! put its slots on a free list; later allocations reuse them, so a live
//! document that has its regions replaced on every navigation stays bounded
//! by its largest page rather than by the number of swaps. Handles into a
//! removed subtree must not be used afterwards.

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()], free: Vec::new() }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for `id`, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of slots in the arena, free ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Slots waiting to be reused
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    fn push(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    /// Create a detached doctype
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::new(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let prev_last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a node from its parent and siblings. Its subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Detach `id` and release it together with its whole subtree
    pub fn remove(&mut self, id: NodeId) {
        if id == NodeId::ROOT || self.get(id).is_none() || self.free.contains(&id) {
            return;
        }
        self.detach(id);

        let mut released: Vec<NodeId> = self.descendants(id).collect();
        released.push(id);
        for slot in released {
            self.nodes[slot.index()] = Node::new(NodeData::Comment(String::new()));
            self.free.push(slot);
        }
    }

    /// Remove every child of `parent`, releasing their subtrees
    pub fn remove_children(&mut self, parent: NodeId) {
        let ids: Vec<NodeId> = self.children(parent).map(|(id, _)| id).collect();
        for id in ids {
            self.remove(id);
        }
    }

    /// Iterate over direct children
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let next = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Pre-order iterator over all descendants of `scope` (excluding `scope`)
    pub fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        let next = self.get(scope).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, scope, next }
    }

    /// Iterator over ancestors of `id`, nearest first (excluding `id`)
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        Ancestors { tree: self, next }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for child in self.descendants(id) {
            if let Some(text) = self.get(child).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    /// Deep-copy the children of `src_parent` in `src` and append them to
    /// `dst_parent` in this tree. Returns the number of top-level nodes copied.
    pub fn import_children(&mut self, dst_parent: NodeId, src: &DomTree, src_parent: NodeId) -> usize {
        let mut count = 0;
        for (child, _) in src.children(src_parent) {
            if let Some(copy) = self.import_node(src, child) {
                self.append_child(dst_parent, copy);
                count += 1;
            }
        }
        count
    }

    /// Deep-copy a single node (and its subtree) from another tree.
    /// The copy is detached; document nodes are not importable.
    pub fn import_node(&mut self, src: &DomTree, src_id: NodeId) -> Option<NodeId> {
        let node = src.get(src_id)?;
        if matches!(node.data, NodeData::Document) {
            return None;
        }
        let copy = self.push(Node::new(node.data.clone()));
        for (child, _) in src.children(src_id) {
            if let Some(child_copy) = self.import_node(src, child) {
                self.append_child(copy, child_copy);
            }
        }
        Some(copy)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order descendant iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    scope: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a next sibling exists, never leaving the scope
            let mut cursor = current;
            loop {
                if cursor == self.scope {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
                if !cursor.is_valid() || cursor == self.scope {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

/// Ancestor iterator
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;
        self.next = node.parent;
        Some(current)
    }
}
