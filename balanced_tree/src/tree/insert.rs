/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Write path: insertion, balancing and depth bookkeeping.
//!
//! Inserting a value descends to the absent slot where it belongs, allocates
//! a node there, and rebalances every ancestor on the way back up. Each
//! recursive step returns the index of whatever node now tops its subtree so
//! the caller can store it in the slot that pointed at the old top.

use std::cmp::Ordering;

use tracing::trace;

use super::{BalancedTree, RebalancePolicy};
use crate::arena::{NodeArena, NodeIndex};
use crate::node::{Node, Side};

impl<T: Ord> BalancedTree<T> {
    /// Insert `value` unless an equal value is already stored.
    ///
    /// Returns `true` if the value was inserted and `false` if it was
    /// rejected as a duplicate, in which case the tree is left untouched.
    pub fn insert(&mut self, value: T) -> bool {
        #[cfg(feature = "unittest")]
        let len_before = self.stats.num_values;

        let inserted = self.insert_value(value);

        #[cfg(feature = "unittest")]
        {
            assert_eq!(
                self.stats.num_values,
                len_before + usize::from(inserted),
                "num_values mismatch: before={len_before}, inserted={inserted}",
            );
            if let Err(violation) = self.check_invariants() {
                panic!("tree invariant violated after insert: {violation}");
            }
        }
        inserted
    }

    fn insert_value(&mut self, value: T) -> bool {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.insert(Node::new(value, None)));
            self.stats.num_values += 1;
            return true;
        };

        match Self::node_insert(
            &mut self.nodes,
            root,
            value,
            self.policy,
            &mut self.stats.num_rotations,
        ) {
            Some(new_root) => {
                self.root = Some(new_root);
                self.stats.num_values += 1;
                true
            }
            None => {
                trace!("duplicate value rejected");
                false
            }
        }
    }

    /// Recursive insert implementation.
    ///
    /// Returns the index of the node now topping the subtree that was rooted
    /// at `node_idx`, or `None` if an equal value was found. On the way back
    /// up, every node refreshes its depth from its children and is handed to
    /// [`balance`](Self::balance) with its freshly computed balance factor.
    fn node_insert(
        nodes: &mut NodeArena<T>,
        node_idx: NodeIndex,
        value: T,
        policy: RebalancePolicy,
        rotations: &mut usize,
    ) -> Option<NodeIndex> {
        let side = match value.cmp(&nodes[node_idx].value) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => return None,
        };

        let child = match nodes[node_idx].child(side) {
            Some(child_idx) => Self::node_insert(nodes, child_idx, value, policy, rotations)?,
            None => nodes.insert(Node::new(value, Some(node_idx))),
        };
        nodes[node_idx].set_child(side, Some(child));

        nodes.update_depth(node_idx);
        let factor = nodes.balance_factor(node_idx);
        Some(Self::balance(nodes, node_idx, factor, policy, rotations))
    }
}

impl<T> BalancedTree<T> {
    /// Recompute the cached depth of every node in the tree.
    ///
    /// This is a full post-order pass; it never relies on the depths
    /// currently cached.
    pub fn recompute_depths(&mut self) {
        if let Some(root) = self.root {
            Self::recompute_subtree_depths(&mut self.nodes, root);
        }
    }

    fn recompute_subtree_depths(nodes: &mut NodeArena<T>, node_idx: NodeIndex) {
        if let Some(left) = nodes[node_idx].left {
            Self::recompute_subtree_depths(nodes, left);
        }
        if let Some(right) = nodes[node_idx].right {
            Self::recompute_subtree_depths(nodes, right);
        }
        nodes.update_depth(node_idx);
    }

    /// Rebalance the subtree rooted at `node_idx` if `factor` triggers `policy`.
    ///
    /// Returns the index of the new subtree top, which is `node_idx` itself
    /// when nothing was rotated.
    ///
    /// # Rotation Strategy
    ///
    /// A positive factor means the left side is heavy: the left child is
    /// promoted by a right rotation. A negative factor is the mirror image.
    ///
    /// Before the main rotation, the heavy child may be rotated the other
    /// way first (the double rotation case):
    ///
    /// - [`RebalancePolicy::ExactTrigger`]: whenever the heavy child has an
    ///   inner child, the heavy child is recursively rebalanced with the
    ///   opposite factor of magnitude 2. The whole resulting subtree then
    ///   has its depths recomputed.
    /// - [`RebalancePolicy::Avl`]: only when the heavy child leans the
    ///   other way. Depths are refreshed on the rotated nodes only.
    #[must_use]
    pub(super) fn balance(
        nodes: &mut NodeArena<T>,
        node_idx: NodeIndex,
        factor: i32,
        policy: RebalancePolicy,
        rotations: &mut usize,
    ) -> NodeIndex {
        if !policy.triggers(factor) {
            return node_idx;
        }

        let heavy = if factor > 0 { Side::Left } else { Side::Right };
        let Some(pivot) = nodes[node_idx].child(heavy) else {
            return node_idx;
        };

        let pre_rotate = match policy {
            RebalancePolicy::ExactTrigger => nodes[pivot].child(heavy.opposite()).is_some(),
            RebalancePolicy::Avl => {
                let pivot_factor = nodes.balance_factor(pivot);
                match heavy {
                    Side::Left => pivot_factor < 0,
                    Side::Right => pivot_factor > 0,
                }
            }
        };

        if pre_rotate {
            let new_pivot = match policy {
                RebalancePolicy::ExactTrigger => {
                    let opposite_factor = match heavy {
                        Side::Left => -2,
                        Side::Right => 2,
                    };
                    Self::balance(nodes, pivot, opposite_factor, policy, rotations)
                }
                RebalancePolicy::Avl => Self::rotate(nodes, pivot, heavy.opposite(), rotations),
            };
            nodes[node_idx].set_child(heavy, Some(new_pivot));
        }

        let top = Self::rotate(nodes, node_idx, heavy, rotations);
        if policy == RebalancePolicy::ExactTrigger {
            Self::recompute_subtree_depths(nodes, top);
        }
        top
    }

    /// Promote the child of `node_idx` on side `promote` to the top of the
    /// subtree and return its index.
    ///
    /// Promoting the left child is a right rotation and vice versa. The
    /// promoted node's inner child is handed over to `node_idx`, which
    /// becomes the promoted node's child on the opposite side. The new top
    /// inherits the old top's parent link; storing it in that parent's child
    /// slot is up to the caller.
    ///
    /// Refreshes the depths of the two rotated nodes from their children.
    fn rotate(
        nodes: &mut NodeArena<T>,
        node_idx: NodeIndex,
        promote: Side,
        rotations: &mut usize,
    ) -> NodeIndex {
        let Some(pivot) = nodes[node_idx].child(promote) else {
            return node_idx;
        };
        let parent = nodes[node_idx].parent;
        let displaced = nodes[pivot].child(promote.opposite());

        nodes[node_idx].set_child(promote, displaced);
        if let Some(displaced) = displaced {
            nodes[displaced].parent = Some(node_idx);
        }

        nodes[pivot].set_child(promote.opposite(), Some(node_idx));
        nodes[node_idx].parent = Some(pivot);
        nodes[pivot].parent = parent;

        nodes.update_depth(node_idx);
        nodes.update_depth(pivot);

        *rotations += 1;
        trace!(
            direction = ?promote.opposite(),
            depth = nodes[pivot].depth,
            "rotated subtree"
        );
        pivot
    }
}
