//! Flat storage for syntax tree nodes.

use crate::{Node, NodeId, NodeKind, Position};

/// Owns every node of one or more trees.
///
/// Nodes are never removed, so a `NodeId` handed out by [`alloc`](Self::alloc)
/// stays valid for the arena's lifetime.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its handle.
    ///
    /// # Panics
    /// Panics if the arena already holds `u32::MAX` nodes.
    pub fn alloc(&mut self, kind: NodeKind, pos: Position) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&i| i != u32::MAX)
            .unwrap_or_else(|| panic!("node arena exceeded capacity"));
        self.nodes.push(Node { kind, pos });
        NodeId::new(index)
    }

    /// Fetch a node.
    ///
    /// # Panics
    /// Panics on an id this arena did not produce. A dangling id means the
    /// tree is malformed; there is no sensible value to evaluate it to.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("unknown node {id:?} (arena holds {})", self.nodes.len()))
    }

    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn pos(&self, id: NodeId) -> Position {
        self.get(id).pos
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
