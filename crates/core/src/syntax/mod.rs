//! Arena syntax tree consumed by the recognizers
//!
//! Trees are produced by a front end ([`crate::parser::KotlinParser`] or any
//! other caller of the builder methods) and are read-only afterwards. A
//! [`Node`] is a cheap `Copy` borrow of one node; nothing in the crate keeps
//! nodes beyond the query that received them.

mod kind;

pub use kind::NodeKind;

use crate::types::Span;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Index of a node inside the [`SyntaxTree`] it belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: Option<String>,
    span: Span,
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Creates a tree holding only a root node of `kind`
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            nodes: vec![NodeData {
                kind,
                parent: None,
                children: Vec::new(),
                text: None,
                span,
            }],
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Returns the node for `id`, or `None` if the id belongs to another tree
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { tree: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a composite node as the last child of `parent`
    pub fn add_node(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        self.push(parent, kind, None, span)
    }

    /// Appends a leaf carrying its own source text as the last child of `parent`
    pub fn add_leaf(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        text: impl Into<String>,
        span: Span,
    ) -> NodeId {
        self.push(parent, kind, Some(text.into()), span)
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind, text: Option<String>, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            text,
            span,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A borrowed node of a [`SyntaxTree`]
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    pub fn is(self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn span(self) -> Span {
        self.tree.data(self.id).span
    }

    pub fn parent(self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| self.with_id(id))
    }

    /// All children, tokens included, in source order
    pub fn children(self) -> impl Iterator<Item = Node<'t>> {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// Structural children: every child that is not a token
    pub fn elements(self) -> impl Iterator<Item = Node<'t>> {
        self.children().filter(|child| !child.kind().is_token())
    }

    pub fn first_element(self) -> Option<Node<'t>> {
        self.elements().next()
    }

    pub fn last_element(self) -> Option<Node<'t>> {
        self.elements().last()
    }

    pub fn first_child_of(self, kind: NodeKind) -> Option<Node<'t>> {
        self.children().find(|child| child.kind() == kind)
    }

    pub fn children_of(self, kind: NodeKind) -> impl Iterator<Item = Node<'t>> {
        self.children().filter(move |child| child.kind() == kind)
    }

    /// Strict ancestors, innermost first
    pub fn ancestors(self) -> impl Iterator<Item = Node<'t>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// The nearest enclosing class or object declaration
    pub fn enclosing_class(self) -> Option<Node<'t>> {
        self.ancestors().find(|node| node.kind().is_class_or_object())
    }

    /// Pre-order traversal of this node's subtree, excluding the node itself
    pub fn descendants(self) -> Descendants<'t> {
        let mut stack: Vec<Node<'t>> = self.children().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// Source text of a leaf, or the concatenated leaf text of a subtree
    pub fn text(self) -> Cow<'t, str> {
        let data = self.tree.data(self.id);
        if let Some(text) = &data.text {
            return Cow::Borrowed(text.as_str());
        }
        let mut text = String::new();
        for node in self.descendants() {
            if let Some(leaf) = &self.tree.data(node.id).text {
                text.push_str(leaf);
            }
        }
        Cow::Owned(text)
    }

    /// True if a direct child is a token the parser had to invent
    pub fn has_missing_child(self) -> bool {
        self.children().any(|child| child.is(NodeKind::Missing))
    }

    fn with_id(self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .field("span", &self.span())
            .finish()
    }
}

pub struct Descendants<'t> {
    stack: Vec<Node<'t>>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(node.children());
        self.stack[start..].reverse();
        Some(node)
    }
}
