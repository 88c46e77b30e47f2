/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Balanced tree implementation.
//!
//! The implementation is split into sub-modules by concern:
//! - [`insert`]: Write path (insert, rebalance, rotations, depth recomputation)
//! - [`find`]: Read path (membership search)
//! - [`invariants`]: Structural validation

mod find;
mod insert;
mod invariants;

pub use invariants::InvariantViolation;

use tracing::debug;

use crate::arena::{NodeArena, NodeIndex};
use crate::node::NodeRef;

/// Decides when an insertion rebalances a subtree.
///
/// The balance factor of a node is the depth of its left subtree minus the
/// depth of its right subtree, where a missing subtree is one level shallower
/// than a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RebalancePolicy {
    /// Rotate only when the factor is exactly `+2` or `-2`.
    ///
    /// Before rotating, a heavy child that has an inner child is itself
    /// rebalanced with the opposite factor, recursively. After every
    /// rotation the depths of the whole rotated subtree are recomputed.
    ///
    /// This policy does not guarantee an AVL-balanced tree: some insertion
    /// orders leave nodes with a factor of `±2` that no later insertion
    /// revisits.
    #[default]
    ExactTrigger,
    /// Textbook AVL: rotate whenever the factor leaves `-1..=1`, with a
    /// double rotation only when the heavy child leans the other way.
    ///
    /// Only the nodes a rotation touches get their depth refreshed.
    Avl,
}

impl RebalancePolicy {
    /// Whether a node with `factor` must be rebalanced.
    pub const fn triggers(self, factor: i32) -> bool {
        match self {
            Self::ExactTrigger => factor == 2 || factor == -2,
            Self::Avl => factor > 1 || factor < -1,
        }
    }
}

/// Aggregate statistics for a [`BalancedTree`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TreeStats {
    /// Number of stored values.
    pub num_values: usize,
    /// Number of single rotations performed since the tree was created or
    /// last cleared. A double rotation counts twice.
    pub num_rotations: usize,
}

/// An ordered set of unique values kept height-balanced by rotations.
///
/// Values double as keys: inserting a value equal to one already stored is
/// rejected. There is no removal of individual values; the whole tree is
/// released with [`clear`](Self::clear), [`destroy`](Self::destroy) or by
/// dropping it.
///
/// # Arena Storage
///
/// All nodes are stored in a `NodeArena` and link to each other by
/// [`NodeIndex`]. Each node owns its two child slots; the parent link is a
/// back-reference only. Rotations return the index of the new subtree top
/// and the caller stores it in whichever slot pointed at the rotated node.
///
/// # Concurrency
///
/// Mutation requires `&mut self`. Sharing a tree between threads needs
/// external synchronization, which the borrow checker enforces.
pub struct BalancedTree<T> {
    /// The root node index, `None` while the tree is empty.
    root: Option<NodeIndex>,
    /// Arena holding all tree nodes.
    nodes: NodeArena<T>,
    /// Aggregate statistics for the tree.
    stats: TreeStats,
    /// When insertions rebalance.
    policy: RebalancePolicy,
}

impl<T> BalancedTree<T> {
    /// Create a new empty tree using [`RebalancePolicy::ExactTrigger`].
    pub const fn new() -> Self {
        Self::with_policy(RebalancePolicy::ExactTrigger)
    }

    /// Create a new empty tree that rebalances according to `policy`.
    pub const fn with_policy(policy: RebalancePolicy) -> Self {
        Self {
            root: None,
            nodes: NodeArena::new(),
            stats: TreeStats {
                num_values: 0,
                num_rotations: 0,
            },
            policy,
        }
    }

    /// The policy this tree rebalances with.
    pub const fn policy(&self) -> RebalancePolicy {
        self.policy
    }

    /// Get the number of values stored in the tree.
    pub const fn len(&self) -> usize {
        self.stats.num_values
    }

    /// Whether the tree holds no value yet.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the number of single rotations performed so far.
    pub const fn rotations(&self) -> usize {
        self.stats.num_rotations
    }

    /// Get the cached depth of the root, `None` for an empty tree.
    pub fn depth(&self) -> Option<u32> {
        self.root.map(|root| self.nodes[root].depth)
    }

    /// Get the root index, `None` for an empty tree.
    pub const fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Get a view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|root| NodeRef::new(&self.nodes, root))
    }

    /// Get the node arena backing the tree.
    pub(crate) const fn nodes(&self) -> &NodeArena<T> {
        &self.nodes
    }

    /// Resolve a [`NodeIndex`] to a view of the node, if it belongs to this tree.
    pub fn node(&self, idx: NodeIndex) -> Option<NodeRef<'_, T>> {
        self.nodes.get(idx).map(|_| NodeRef::new(&self.nodes, idx))
    }

    /// Calculate the total memory usage of the tree, in bytes.
    pub fn mem_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.nodes.mem_usage()
    }

    /// Release every node and leave an empty tree behind.
    ///
    /// Statistics are reset; the rebalance policy is kept. Any
    /// [`NodeIndex`] obtained before the call no longer resolves, even after
    /// new values reoccupy its slot.
    pub fn clear(&mut self) {
        debug!(num_values = self.stats.num_values, "clearing balanced tree");
        self.root = None;
        self.nodes.clear();
        self.stats = TreeStats::default();
    }

    /// Release the whole tree.
    ///
    /// Consumes the handle, so no node of the tree can be reached afterwards:
    ///
    /// ```compile_fail
    /// let mut tree = balanced_tree::BalancedTree::new();
    /// tree.insert(1);
    /// tree.destroy();
    /// tree.search(&1);
    /// ```
    pub fn destroy(mut self) {
        self.clear();
    }
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
