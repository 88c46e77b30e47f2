/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Structural invariant checks for the balanced tree.
//!
//! With the `unittest` feature enabled these checks run after every
//! insertion to catch structural violations early.

use thiserror::Error;

use super::{BalancedTree, RebalancePolicy};
use crate::arena::{NodeArena, NodeIndex};

/// A structural invariant that does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The root links to a parent.
    #[error("root {root} has parent {parent}")]
    RootHasParent {
        /// The root node.
        root: NodeIndex,
        /// The parent it claims.
        parent: NodeIndex,
    },
    /// A child does not link back to the node holding it.
    #[error("node {node} is a child of {expected} but links to parent {actual:?}")]
    ParentMismatch {
        /// The child node.
        node: NodeIndex,
        /// The node whose slot holds it.
        expected: NodeIndex,
        /// The parent link it actually carries.
        actual: Option<NodeIndex>,
    },
    /// A value sits on the wrong side of one of its ancestors.
    #[error("node {node} breaks search-tree order")]
    OrderViolation {
        /// The misplaced node.
        node: NodeIndex,
    },
    /// The cached depth differs from the height of the subtree.
    #[error("depth mismatch at node {node}: stored {stored}, expected {expected}")]
    DepthMismatch {
        /// The node with the stale depth.
        node: NodeIndex,
        /// The cached depth.
        stored: u32,
        /// The depth recomputed from its children.
        expected: u32,
    },
    /// Under [`RebalancePolicy::Avl`], a subtree is out of balance.
    #[error("node {node} has balance factor {factor} outside -1..=1")]
    Imbalanced {
        /// The unbalanced node.
        node: NodeIndex,
        /// Its balance factor.
        factor: i32,
    },
    /// The number of reachable nodes differs from the stored count.
    #[error("{reachable} nodes reachable from the root, but the tree counts {stored} values")]
    CountMismatch {
        /// Nodes found by walking the tree.
        reachable: usize,
        /// The stored value count.
        stored: usize,
    },
}

impl<T: Ord> BalancedTree<T> {
    /// Verify all structural invariants of the tree.
    ///
    /// Checks, for every node:
    /// 1. **Order**: every value in the left subtree is smaller and every
    ///    value in the right subtree is larger.
    /// 2. **Depth**: the cached depth equals the height recomputed from the
    ///    children.
    /// 3. **Parent links**: each child links back to the node holding it,
    ///    and only the root has no parent.
    /// 4. **Balance**: under [`RebalancePolicy::Avl`] only, the balance
    ///    factor stays within `-1..=1`.
    ///
    /// Also checks that the nodes reachable from the root account for every
    /// stored value and every allocated node.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return match self.stats.num_values {
                0 => Ok(()),
                stored => Err(InvariantViolation::CountMismatch {
                    reachable: 0,
                    stored,
                }),
            };
        };

        if let Some(parent) = self.nodes[root].parent {
            return Err(InvariantViolation::RootHasParent { root, parent });
        }

        let mut reachable = 0;
        self.check_node_invariants(root, None, None, &mut reachable)?;

        if reachable != self.stats.num_values || reachable != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                stored: self.stats.num_values,
            });
        }
        Ok(())
    }

    /// Recursively check invariants for the subtree rooted at `node_idx`.
    ///
    /// `lower` and `upper` are the exclusive bounds inherited from the
    /// ancestors.
    fn check_node_invariants(
        &self,
        node_idx: NodeIndex,
        lower: Option<&T>,
        upper: Option<&T>,
        reachable: &mut usize,
    ) -> Result<(), InvariantViolation> {
        let nodes: &NodeArena<T> = &self.nodes;
        let node = &nodes[node_idx];
        *reachable += 1;

        if lower.is_some_and(|lower| node.value <= *lower)
            || upper.is_some_and(|upper| node.value >= *upper)
        {
            return Err(InvariantViolation::OrderViolation { node: node_idx });
        }

        for child in [node.left, node.right].into_iter().flatten() {
            if nodes[child].parent != Some(node_idx) {
                return Err(InvariantViolation::ParentMismatch {
                    node: child,
                    expected: node_idx,
                    actual: nodes[child].parent,
                });
            }
        }

        if let Some(left) = node.left {
            self.check_node_invariants(left, lower, Some(&node.value), reachable)?;
        }
        if let Some(right) = node.right {
            self.check_node_invariants(right, Some(&node.value), upper, reachable)?;
        }

        // Children were validated first, so their cached depths can be trusted.
        let expected = nodes.expected_depth(node_idx);
        if node.depth != expected {
            return Err(InvariantViolation::DepthMismatch {
                node: node_idx,
                stored: node.depth,
                expected,
            });
        }

        if self.policy == RebalancePolicy::Avl {
            let factor = nodes.balance_factor(node_idx);
            if !(-1..=1).contains(&factor) {
                return Err(InvariantViolation::Imbalanced {
                    node: node_idx,
                    factor,
                });
            }
        }

        Ok(())
    }
}
