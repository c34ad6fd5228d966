//! Arena-backed decision tree.
//!
//! Levels alternate below the root: a *key* node per property name, then a
//! *value* node per property value, then key nodes for the next property in
//! sorted order, and so on. Only the root and value nodes ever carry data.
//!
//! Nodes are never freed. Removing a pattern clears its payload and leaves
//! the node in place as a routing branch, so [`NodeId`]s stay valid for the
//! lifetime of the tree and can be held on a backtrack stack without borrows.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::hooks::Modifier;
use crate::types::Properties;

/// Dense index of a node inside a [`PatternTree`].
///
/// Ids are arena positions and stay valid for the lifetime of the tree.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, present in every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in its tree's arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Addressed by a property name.
    Key,
    /// Addressed by a property value.
    Value,
}

pub struct Node<T> {
    kind: NodeKind,
    label: String,
    children: BTreeMap<String, NodeId>,
    pub(crate) data: Option<T>,
    pub(crate) modifier: Option<Arc<dyn Modifier<T>>>,
}

impl<T> Node<T> {
    fn new(kind: NodeKind, label: String) -> Self {
        Self {
            kind,
            label,
            children: BTreeMap::new(),
            data: None,
            modifier: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Property name for key nodes, property value for value nodes, empty for the root.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in lexicographic label order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(label, id)| (label.as_str(), *id))
    }

    pub fn child(&self, label: &str) -> Option<NodeId> {
        self.children.get(label).copied()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn modifier(&self) -> Option<&Arc<dyn Modifier<T>>> {
        self.modifier.as_ref()
    }

    /// Overwrite the payload. Re-registering a pattern replaces both parts.
    pub(crate) fn set_payload(&mut self, data: T, modifier: Option<Arc<dyn Modifier<T>>>) {
        self.data = Some(data);
        self.modifier = modifier;
    }

    /// Soft delete: the node keeps its position and children.
    pub(crate) fn clear_payload(&mut self) -> Option<T> {
        self.modifier = None;
        self.data.take()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("children", &self.children)
            .field("data", &self.data)
            .field("modifier", &self.modifier.is_some())
            .finish()
    }
}

/// Sole owner of every node reachable from the root.
pub struct PatternTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for PatternTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PatternTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, String::new())],
        }
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but an empty root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.root().data.is_none()
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).has_children()
    }

    /// One property step: key node `name` under `from`, then value node `value` under that.
    pub fn step(&self, from: NodeId, name: &str, value: &str) -> Option<NodeId> {
        let key = self.node(from).child(name)?;
        self.node(key).child(value)
    }

    /// Structural walk with no backtracking. Returns the node at the end of the
    /// canonical path for `properties` only when every step exists.
    pub fn walk_exact(&self, properties: &Properties) -> Option<NodeId> {
        properties
            .iter()
            .try_fold(NodeId::ROOT, |at, (name, value)| self.step(at, name, value))
    }

    /// Walk the canonical path for `properties`, creating missing nodes, and
    /// return the terminal value node (the root for an empty set).
    pub(crate) fn ensure_path(&mut self, properties: &Properties) -> NodeId {
        let mut at = NodeId::ROOT;
        for (name, value) in properties {
            let key = self.ensure_child(at, NodeKind::Key, name);
            at = self.ensure_child(key, NodeKind::Value, value);
        }
        at
    }

    fn ensure_child(&mut self, parent: NodeId, kind: NodeKind, label: &str) -> NodeId {
        if let Some(existing) = self.node(parent).child(label) {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, label.to_string()));
        let parent = self.node_mut(parent);
        parent.children.insert(label.to_string(), id);
        id
    }
}

impl<T: fmt::Debug> fmt::Debug for PatternTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternTree")
            .field("nodes", &self.nodes)
            .finish()
    }
}
