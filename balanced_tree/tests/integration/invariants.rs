/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for structural validation.

use balanced_tree::{BalancedTree, InvariantViolation, RebalancePolicy};

use crate::helpers::{POLICIES, build_tree, walk_with_level};

#[test]
fn test_valid_trees_pass() {
    for policy in POLICIES {
        BalancedTree::<i32>::with_policy(policy)
            .check_invariants()
            .unwrap();

        let descending: Vec<i32> = (0..256).rev().collect();
        build_tree(&descending, policy).check_invariants().unwrap();

        let zigzag: Vec<i32> = (0..128).flat_map(|i| [i, 1000 - i]).collect();
        build_tree(&zigzag, policy).check_invariants().unwrap();
    }
}

#[test]
fn test_only_root_lacks_parent() {
    let tree = build_tree(&(0..64).collect::<Vec<_>>(), RebalancePolicy::ExactTrigger);

    let mut orphans = 0;
    walk_with_level(&tree, &mut |node, level| match node.parent() {
        None => {
            orphans += 1;
            assert_eq!(level, 0);
        }
        Some(parent) => {
            let linked = [parent.left(), parent.right()]
                .into_iter()
                .flatten()
                .any(|child| child.index() == node.index());
            assert!(linked, "parent of {} does not hold it", node.value());
        }
    });
    assert_eq!(orphans, 1);
}

#[test]
fn test_exact_trigger_is_not_checked_for_balance() {
    // Leaves a node with a factor of -2 behind, which is fine for this policy.
    let tree = build_tree(&[1, 2, 3, 4, 5, 6], RebalancePolicy::ExactTrigger);
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[test]
fn test_violation_messages() {
    let tree = build_tree(&[2, 1, 3], RebalancePolicy::Avl);
    let root = tree.root_index().unwrap();
    let child = tree.root().unwrap().left().unwrap().index();

    let depth = InvariantViolation::DepthMismatch {
        node: root,
        stored: 4,
        expected: 1,
    };
    assert_eq!(
        depth.to_string(),
        format!("depth mismatch at node {root}: stored 4, expected 1")
    );

    let parent = InvariantViolation::ParentMismatch {
        node: child,
        expected: root,
        actual: None,
    };
    assert_eq!(
        parent.to_string(),
        format!("node {child} is a child of {root} but links to parent None")
    );

    let count = InvariantViolation::CountMismatch {
        reachable: 2,
        stored: 3,
    };
    assert_eq!(
        count.to_string(),
        "2 nodes reachable from the root, but the tree counts 3 values"
    );
}
