/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Property-based tests for the balanced tree using `proptest`.

#[cfg(not(miri))]
mod proptests {
    use std::collections::BTreeSet;

    use balanced_tree::{BalancedTree, RebalancePolicy};
    use proptest::prelude::*;

    use crate::helpers::{POLICIES, in_order_values, walk_with_level};

    fn policy() -> impl Strategy<Value = RebalancePolicy> {
        proptest::sample::select(POLICIES.to_vec())
    }

    proptest! {
        #[test]
        fn prop_insert_matches_set_model(
            policy in policy(),
            values in proptest::collection::vec(-500i32..500, 0..300),
        ) {
            let mut tree = BalancedTree::with_policy(policy);
            let mut model = BTreeSet::new();

            for value in &values {
                let before = in_order_values(&tree);
                let inserted = tree.insert(*value);
                prop_assert_eq!(inserted, model.insert(*value));
                prop_assert_eq!(tree.len(), model.len());

                // Rotations reorganize the shape, never the contents.
                let after = in_order_values(&tree);
                if inserted {
                    let mut expected = before;
                    expected.push(*value);
                    expected.sort_unstable();
                    prop_assert_eq!(after, expected);
                } else {
                    prop_assert_eq!(after, before);
                }

                if let Err(violation) = tree.check_invariants() {
                    return Err(TestCaseError::fail(violation.to_string()));
                }
            }
        }

        #[test]
        fn prop_search_finds_exactly_inserted_values(
            policy in policy(),
            values in proptest::collection::vec(0u16..2000, 1..200),
        ) {
            let mut tree = BalancedTree::with_policy(policy);
            for value in &values {
                tree.insert(*value);
            }

            let stored: BTreeSet<u16> = values.iter().copied().collect();
            for probe in 0u16..2000 {
                prop_assert_eq!(tree.search(&probe), stored.contains(&probe));
            }
        }

        #[test]
        fn prop_cached_depths_are_coherent(
            policy in policy(),
            values in proptest::collection::vec(any::<i64>(), 1..200),
        ) {
            let mut tree = BalancedTree::with_policy(policy);
            for value in &values {
                tree.insert(*value);
            }

            // Recompute every height bottom-up and compare with the cache.
            fn height(node: balanced_tree::NodeRef<'_, i64>) -> u32 {
                match (node.left(), node.right()) {
                    (None, None) => 0,
                    (Some(child), None) | (None, Some(child)) => height(child) + 1,
                    (Some(left), Some(right)) => height(left).max(height(right)) + 1,
                }
            }
            let mut mismatches = Vec::new();
            walk_with_level(&tree, &mut |node, _| {
                if node.depth() != height(node) {
                    mismatches.push(*node.value());
                }
            });
            prop_assert!(mismatches.is_empty(), "stale depths at {:?}", mismatches);
        }

        #[test]
        fn prop_avl_height_is_logarithmic(
            values in proptest::collection::btree_set(any::<u32>(), 1..500),
        ) {
            let mut tree = BalancedTree::with_policy(RebalancePolicy::Avl);
            for value in &values {
                tree.insert(*value);
            }

            // An AVL tree with n nodes has height below 1.45 * log2(n + 2).
            let n = values.len() as f64;
            let bound = 1.45 * (n + 2.0).log2();
            let depth = tree.depth().unwrap();
            prop_assert!(f64::from(depth) < bound, "depth {} exceeds bound {}", depth, bound);
        }
    }
}
