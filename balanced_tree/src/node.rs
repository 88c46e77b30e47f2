/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Node - a single value of the tree together with its links.

use crate::arena::{NodeArena, NodeIndex};

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The slot holding strictly smaller values.
    Left,
    /// The slot holding strictly larger values.
    Right,
}

impl Side {
    /// The other slot.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A node of the tree.
///
/// Child slots are owned: each [`NodeIndex`] stored in `left` or `right`
/// appears in exactly one slot of the whole tree. `parent` is a plain
/// back-reference used when walking upwards and never implies ownership.
#[derive(Debug)]
pub(crate) struct Node<T> {
    /// The stored value. Doubles as the search key.
    pub value: T,
    /// Cached height of the subtree rooted here. A leaf has depth 0.
    pub depth: u32,
    /// The enclosing node, `None` for the root.
    pub parent: Option<NodeIndex>,
    /// Subtree of strictly smaller values.
    pub left: Option<NodeIndex>,
    /// Subtree of strictly larger values.
    pub right: Option<NodeIndex>,
}

impl<T> Node<T> {
    /// Creates a childless node holding `value`.
    pub const fn new(value: T, parent: Option<NodeIndex>) -> Self {
        Self {
            value,
            depth: 0,
            parent,
            left: None,
            right: None,
        }
    }

    pub const fn child(&self, side: Side) -> Option<NodeIndex> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub const fn set_child(&mut self, side: Side, child: Option<NodeIndex>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T> NodeArena<T> {
    /// Depth the node at `idx` should have, computed from its children's
    /// cached depths.
    pub(crate) fn expected_depth(&self, idx: NodeIndex) -> u32 {
        let node = &self[idx];
        match (node.left, node.right) {
            (None, None) => 0,
            (Some(only), None) | (None, Some(only)) => self[only].depth + 1,
            (Some(left), Some(right)) => self[left].depth.max(self[right].depth) + 1,
        }
    }

    /// Refresh the cached depth of a single node from its children.
    pub(crate) fn update_depth(&mut self, idx: NodeIndex) {
        self[idx].depth = self.expected_depth(idx);
    }

    /// Signed balance factor of the node at `idx`.
    ///
    /// Positive when the left side is deeper. A missing child counts as one
    /// level shallower than a leaf, so a node with a single leaf child has a
    /// factor of `±1`.
    pub(crate) fn balance_factor(&self, idx: NodeIndex) -> i32 {
        let node = &self[idx];
        match (node.left, node.right) {
            (None, None) => 0,
            (Some(left), None) => self[left].depth as i32 + 1,
            (None, Some(right)) => -(self[right].depth as i32) - 1,
            (Some(left), Some(right)) => self[left].depth as i32 - self[right].depth as i32,
        }
    }
}

/// Read-only view of a node inside a [`BalancedTree`](crate::BalancedTree).
///
/// Borrowing the tree for the lifetime of the view keeps every link it hands
/// out valid.
pub struct NodeRef<'a, T> {
    nodes: &'a NodeArena<T>,
    index: NodeIndex,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) const fn new(nodes: &'a NodeArena<T>, index: NodeIndex) -> Self {
        Self { nodes, index }
    }

    fn node(&self) -> &'a Node<T> {
        &self.nodes[self.index]
    }

    fn link(&self, link: Option<NodeIndex>) -> Option<Self> {
        link.map(|index| Self::new(self.nodes, index))
    }

    /// Position of this node in the tree's arena.
    pub const fn index(&self) -> NodeIndex {
        self.index
    }

    /// The stored value.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// Cached height of the subtree rooted at this node.
    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    /// Balance factor computed from the children's cached depths.
    ///
    /// This is the quantity the insertion path compares against the
    /// rebalance trigger.
    pub fn balance_factor(&self) -> i32 {
        self.nodes.balance_factor(self.index)
    }

    /// The enclosing node, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.link(self.node().parent)
    }

    /// The subtree of smaller values.
    pub fn left(&self) -> Option<Self> {
        self.link(self.node().left)
    }

    /// The subtree of larger values.
    pub fn right(&self) -> Option<Self> {
        self.link(self.node().right)
    }

    /// The child on `side`.
    pub fn child(&self, side: Side) -> Option<Self> {
        self.link(self.node().child(side))
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("value", self.value())
            .field("depth", &self.depth())
            .finish()
    }
}
