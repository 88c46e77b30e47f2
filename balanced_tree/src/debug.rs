/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Debug and introspection utilities for the balanced tree.
//!
//! The dumps write one line per node to any [`io::Write`] sink, visiting
//! children before their parent. The [`Debug`](fmt::Debug) rendering shows
//! the shape of the tree instead.

use std::fmt;
use std::io;

use crate::BalancedTree;
use crate::arena::{NodeArena, NodeIndex};
use crate::node::Side;

impl<T: fmt::Display> BalancedTree<T> {
    /// Write every stored value, one per line, in post-order.
    pub fn dump_values<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.post_order(&mut |nodes, idx| writeln!(out, "{}", nodes[idx].value))
    }

    /// Write `"{balance_factor} {depth} {value}"` for every node, one per
    /// line, in post-order.
    pub fn dump_diagnostics<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.post_order(&mut |nodes, idx| {
            let node = &nodes[idx];
            writeln!(
                out,
                "{} {} {}",
                nodes.balance_factor(idx),
                node.depth,
                node.value
            )
        })
    }
}

impl<T> BalancedTree<T> {
    /// Visit every node exactly once, children before their parent.
    fn post_order<E, F>(&self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&NodeArena<T>, NodeIndex) -> Result<(), E>,
    {
        fn walk<T, E, F>(nodes: &NodeArena<T>, node_idx: NodeIndex, visit: &mut F) -> Result<(), E>
        where
            F: FnMut(&NodeArena<T>, NodeIndex) -> Result<(), E>,
        {
            if let Some(left) = nodes[node_idx].left {
                walk(nodes, left, visit)?;
            }
            if let Some(right) = nodes[node_idx].right {
                walk(nodes, right, visit)?;
            }
            visit(nodes, node_idx)
        }

        match self.root_index() {
            Some(root) => walk(self.nodes(), root, visit),
            None => Ok(()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BalancedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root_index() else {
            return f.write_str("(empty)");
        };

        let mut stack = vec![(root, None, 0)];
        while let Some((node_idx, side, indentation)) = stack.pop() {
            let node = &self.nodes()[node_idx];
            let prefix = match side {
                None => String::new(),
                Some(Side::Left) => format!("{}↳L ", " ".repeat(indentation)),
                Some(Side::Right) => format!("{}↳R ", " ".repeat(indentation)),
            };
            writeln!(f, "{prefix}{:?} (depth {})", node.value, node.depth)?;

            // Right is pushed first so that the left subtree is printed first.
            if let Some(right) = node.right {
                stack.push((right, Some(Side::Right), indentation + 2));
            }
            if let Some(left) = node.left {
                stack.push((left, Some(Side::Left), indentation + 2));
            }
        }
        Ok(())
    }
}
