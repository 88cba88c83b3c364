//! Arena backed tag tree
//!
//! Nodes live in a flat vector and refer to each other by [`NodeId`]. A node's parent is
//! stored as an index and is only used for traversal; ownership is the arena's. Node 0 is
//! always the root.

use crate::bbtext::token::Attributes;
use serde::Serialize;

/// Index of a node in its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Root,
    /// A tag, holding its canonical name.
    Element(String),
    /// Literal text (leaf).
    Content(String),
    /// A verbatim line break (leaf).
    Newline(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    kind: NodeKind,
    /// Tag names of the enclosing elements, outermost first.
    ancestors: Vec<String>,
    attributes: Attributes,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(name) => Some(name),
            _ => None,
        }
    }

    /// Text of a leaf node.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Content(text) | NodeKind::Newline(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.content().is_some()
    }

    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// A tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                ancestors: Vec::new(),
                attributes: Attributes::new(),
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node. Ids always come from this tree, so a miss is a programmer error.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(node) => node,
            None => fatal_foreign_node(id, self.nodes.len()),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
        attributes: Attributes,
    ) -> NodeId {
        self.append(parent, NodeKind::Element(tag.into()), attributes)
    }

    pub fn append_content(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeKind::Content(text.into()), Attributes::new())
    }

    pub fn append_newline(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeKind::Newline(text.into()), Attributes::new())
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind, attributes: Attributes) -> NodeId {
        let parent_node = self.node(parent);
        if parent_node.is_leaf() {
            fatal_leaf_parent(parent);
        }
        let mut ancestors = parent_node.ancestors.clone();
        if let Some(tag) = parent_node.tag_name() {
            ancestors.push(tag.to_string());
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            ancestors,
            attributes,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Leaf ids in document order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut pending = vec![self.root()];
        while let Some(id) = pending.pop() {
            let node = self.node(id);
            if node.is_leaf() {
                leaves.push(id);
            } else {
                pending.extend(node.children.iter().rev().copied());
            }
        }
        leaves
    }

    /// Concatenated text of all leaves.
    pub fn text(&self) -> String {
        self.leaves()
            .into_iter()
            .filter_map(|id| self.node(id).content())
            .collect()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

fn fatal_foreign_node(id: NodeId, len: usize) -> ! {
    panic!("node {} does not belong to this tree ({} nodes)", id.0, len);
}

fn fatal_leaf_parent(id: NodeId) -> ! {
    panic!("leaf node {} cannot own children", id.0);
}
