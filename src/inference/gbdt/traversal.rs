//! Single-tree traversal.
//!
//! Traversal is bounded by the node count, so even a tree that skipped
//! validation cannot loop forever or index out of bounds: it fails with a
//! [`TreeValidationError`] instead.

use crate::repr::gbdt::{NodeId, Tree, TreeValidationError};

/// Walk `tree` from the root to the leaf selected by `features`.
///
/// # Returns
///
/// The `NodeId` of the reached leaf node.
///
/// # Errors
///
/// - [`TreeValidationError::EmptyTree`] for a tree without nodes
/// - [`TreeValidationError::LengthMismatch`] for ragged node arrays
/// - [`TreeValidationError::FeatureOutOfRange`] if a split reads past `features`
/// - [`TreeValidationError::ChildOutOfBounds`] for a dangling child index
/// - [`TreeValidationError::TraversalLimit`] if no leaf is reached within
///   `n_nodes` steps (a cycle)
#[inline]
pub fn traverse_to_leaf(tree: &Tree, features: &[f64]) -> Result<NodeId, TreeValidationError> {
    tree.check_shape()?;
    let n_nodes = tree.n_nodes();

    let mut node: NodeId = 0;
    // A root-to-leaf path in an acyclic tree visits at most `n_nodes` nodes.
    for _ in 0..n_nodes {
        if tree.is_leaf(node) {
            return Ok(node);
        }

        let feat_idx = tree.split_index(node) as usize;
        let fvalue = *features
            .get(feat_idx)
            .ok_or(TreeValidationError::FeatureOutOfRange {
                node,
                feature: feat_idx as i64,
                n_features: features.len(),
            })?;

        let (side, next) = if fvalue < tree.split_threshold(node) {
            ("left", tree.left_child(node))
        } else {
            ("right", tree.right_child(node))
        };

        if next as usize >= n_nodes {
            return Err(TreeValidationError::ChildOutOfBounds {
                node,
                side,
                child: i64::from(next),
                n_nodes,
            });
        }
        node = next;
    }

    Err(TreeValidationError::TraversalLimit { steps: n_nodes })
}

/// Leaf weight `tree` assigns to `features`.
///
/// Internal-node weights are never returned.
#[inline]
pub fn evaluate(tree: &Tree, features: &[f64]) -> Result<f64, TreeValidationError> {
    let leaf = traverse_to_leaf(tree, features)?;
    Ok(tree.base_weight(leaf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Two-level tree with distinctive internal weights.
    ///
    /// ```text
    ///          0: f0 < 0.5 (w=100)
    ///         /            \
    ///   1: leaf -1.0    2: f1 < 2.0 (w=200)
    ///                    /        \
    ///              3: leaf 0.5   4: leaf 1.5
    /// ```
    fn two_level_tree() -> Tree {
        Tree::new(
            vec![0, 0, 1, 0, 0],
            vec![0.5, 0.0, 2.0, 0.0, 0.0],
            vec![1, 0, 3, 0, 0],
            vec![2, 0, 4, 0, 0],
            vec![false, true, false, true, true],
            vec![100.0, -1.0, 200.0, 0.5, 1.5],
        )
    }

    #[rstest]
    #[case(&[0.3, 0.0], 1, -1.0)]
    #[case(&[0.7, 1.0], 3, 0.5)]
    #[case(&[0.7, 3.0], 4, 1.5)]
    // Strict less-than: equal to threshold goes right.
    #[case(&[0.5, 2.0], 4, 1.5)]
    #[case(&[f64::NAN, 0.0], 3, 0.5)]
    fn reaches_expected_leaf(#[case] row: &[f64], #[case] leaf: NodeId, #[case] weight: f64) {
        let tree = two_level_tree();
        assert_eq!(traverse_to_leaf(&tree, row), Ok(leaf));
        assert_eq!(evaluate(&tree, row), Ok(weight));
    }

    #[test]
    fn single_leaf_ignores_input() {
        let tree = Tree::leaf(0.42);
        assert_eq!(evaluate(&tree, &[]), Ok(0.42));
        assert_eq!(evaluate(&tree, &[1e9; 11]), Ok(0.42));
    }

    #[test]
    fn never_returns_internal_weight() {
        let tree = two_level_tree();
        for x0 in [-1.0, 0.49, 0.5, 10.0] {
            for x1 in [-5.0, 1.99, 2.0, 7.0] {
                let w = evaluate(&tree, &[x0, x1]).unwrap();
                assert!(w != 100.0 && w != 200.0, "got internal weight {w}");
            }
        }
    }

    #[test]
    fn cycle_fails_instead_of_looping() {
        // 0 -> 1 -> 0 on every path; no leaf is reachable.
        let tree = Tree::new(
            vec![0, 0],
            vec![0.5, 0.5],
            vec![1, 0],
            vec![1, 0],
            vec![false, false],
            vec![0.0, 0.0],
        );
        assert_eq!(
            evaluate(&tree, &[0.0]),
            Err(TreeValidationError::TraversalLimit { steps: 2 })
        );
    }

    #[test]
    fn dangling_child_fails() {
        let tree = Tree::new(
            vec![0],
            vec![0.5],
            vec![5],
            vec![6],
            vec![false],
            vec![0.0],
        );
        assert!(matches!(
            evaluate(&tree, &[0.0]),
            Err(TreeValidationError::ChildOutOfBounds { child: 5, side: "left", .. })
        ));
    }

    #[test]
    fn short_row_fails() {
        let tree = two_level_tree();
        assert!(matches!(
            evaluate(&tree, &[0.9]),
            Err(TreeValidationError::FeatureOutOfRange { feature: 1, n_features: 1, .. })
        ));
    }

    #[test]
    fn ragged_arrays_fail() {
        let tree = Tree::new(vec![0], vec![0.0], vec![0], vec![0], vec![true, true], vec![]);
        assert!(matches!(
            evaluate(&tree, &[0.0]),
            Err(TreeValidationError::LengthMismatch { n_nodes: 2, .. })
        ));
    }
}
