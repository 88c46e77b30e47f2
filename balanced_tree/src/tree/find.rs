/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: membership queries.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::BalancedTree;
use crate::arena::{NodeArena, NodeIndex};

impl<T> BalancedTree<T> {
    /// Whether a value equal to `value` is stored in the tree.
    ///
    /// Accepts any borrowed form of the stored type, e.g. `&str` for a tree
    /// of `String`s.
    pub fn search<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root
            .is_some_and(|root| Self::node_search(&self.nodes, root, value))
    }

    fn node_search<Q>(nodes: &NodeArena<T>, node_idx: NodeIndex, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = &nodes[node_idx];
        match value.cmp(node.value.borrow()) {
            Ordering::Equal => true,
            Ordering::Less => node
                .left
                .is_some_and(|left| Self::node_search(nodes, left, value)),
            Ordering::Greater => node
                .right
                .is_some_and(|right| Self::node_search(nodes, right, value)),
        }
    }
}
