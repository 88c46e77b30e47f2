/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Arena storage for tree nodes.
//!
//! Every node of a [`BalancedTree`](crate::BalancedTree) lives in a single
//! vector owned by the tree. Links between nodes are [`NodeIndex`] values
//! instead of pointers, so rotations only rewrite indices and the parent
//! back-reference never has to be an aliasing pointer.
//!
//! The tree never removes individual nodes, so slots are only recycled when
//! the whole arena is cleared. Each clear starts a new generation, and an
//! index from an earlier generation no longer resolves even once its slot
//! is occupied again.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::node::Node;

/// Index into the node arena.
///
/// A lightweight handle that is stable across every mutation of the tree
/// short of [`clear`](crate::BalancedTree::clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex {
    slot: u32,
    generation: u32,
}

impl NodeIndex {
    /// The raw slot position inside the arena.
    pub const fn position(self) -> u32 {
        self.slot
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot)
    }
}

/// Arena storage for [`Node`]s.
#[derive(Debug)]
pub(crate) struct NodeArena<T> {
    nodes: Vec<Node<T>>,
    /// Bumped on every clear; stamped into each index handed out.
    generation: u32,
}

impl<T> NodeArena<T> {
    /// Create a new empty arena.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: 0,
        }
    }

    /// Get the number of nodes currently stored in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get a reference to a node in the arena, if it exists.
    ///
    /// Indices handed out before the last [`clear`](Self::clear) resolve to
    /// `None`.
    pub fn get(&self, idx: NodeIndex) -> Option<&Node<T>> {
        if idx.generation != self.generation {
            return None;
        }
        self.nodes.get(idx.slot as usize)
    }

    /// Insert a node into the arena, returning its index.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes.
    pub fn insert(&mut self, node: Node<T>) -> NodeIndex {
        let position = u32::try_from(self.nodes.len()).expect("node arena exceeded u32::MAX slots");
        self.nodes.push(node);
        NodeIndex {
            slot: position,
            generation: self.generation,
        }
    }

    /// Drop every node, releasing the whole structure at once.
    ///
    /// Starts a new generation, so every index handed out so far goes stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Get the memory usage of the arena, in bytes.
    pub fn mem_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node<T>>()
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeIndex> for NodeArena<T> {
    type Output = Node<T>;

    fn index(&self, idx: NodeIndex) -> &Self::Output {
        debug_assert_eq!(idx.generation, self.generation, "stale node index {idx}");
        &self.nodes[idx.slot as usize]
    }
}

impl<T> IndexMut<NodeIndex> for NodeArena<T> {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Self::Output {
        debug_assert_eq!(idx.generation, self.generation, "stale node index {idx}");
        &mut self.nodes[idx.slot as usize]
    }
}
