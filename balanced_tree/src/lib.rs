/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! BalancedTree - an ordered set of unique values kept balanced by rotations.
//!
//! This crate provides a low-level indexing primitive: a binary search tree
//! that stores comparable values, rejects duplicates, and restructures
//! itself with rotations as values are inserted.
//!
//! # Overview
//!
//! - Insertion that reports whether the value was new
//! - Membership search
//! - Post-order dumps of values and per-node diagnostics
//! - Read-only navigation of the tree shape through [`NodeRef`]
//! - A choice of [`RebalancePolicy`]: the exact `±2` trigger, or textbook AVL
//!
//! There is no removal of individual values.
//!
//! # Example
//!
//! ```
//! use balanced_tree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//!
//! assert!(tree.insert(3));
//! assert!(tree.insert(2));
//! assert!(tree.insert(1));
//! // Duplicates are rejected.
//! assert!(!tree.insert(2));
//!
//! assert!(tree.search(&1));
//! assert!(!tree.search(&4));
//!
//! // Inserting in descending order rotated 2 to the top.
//! assert_eq!(tree.root().map(|root| *root.value()), Some(2));
//!
//! let mut out = Vec::new();
//! tree.dump_values(&mut out).unwrap();
//! assert_eq!(out, b"1\n3\n2\n");
//! ```

mod arena;
mod debug;
mod node;
mod tree;

pub use arena::NodeIndex;
pub use node::{NodeRef, Side};
pub use tree::{BalancedTree, InvariantViolation, RebalancePolicy};
