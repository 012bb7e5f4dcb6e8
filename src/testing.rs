//! Testing utilities for diabetes-gbdt.
//!
//! Assertion helpers, a compact tree-building macro and access to the
//! on-disk fixture artifacts. Usable from unit tests and from `tests/`:
//!
//! ```ignore
//! use diabetes_gbdt::testing::{fixture_dir, fixture_sources};
//! use diabetes_gbdt::{assert_approx_eq, scalar_tree};
//! ```

use std::path::PathBuf;

use crate::artifacts::ArtifactSources;
use crate::repr::gbdt::{NodeId, Tree};

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for probability and margin comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use diabetes_gbdt::assert_approx_eq;
/// assert_approx_eq!(0.524_979, 0.524_98, 1e-5);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

// =============================================================================
// Tree Construction
// =============================================================================

/// One node of a hand-written tree, see [`scalar_tree!`](crate::scalar_tree).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSpec {
    Split {
        feature: u32,
        threshold: f64,
        left: NodeId,
        right: NodeId,
    },
    Leaf(f64),
}

/// Build a [`Tree`] from `(node id, spec)` pairs in any order.
///
/// Ids must cover `0..n` exactly once. Split nodes get a base weight of 0.0.
///
/// # Panics
///
/// Panics on a missing or repeated id.
pub fn tree_from_nodes(nodes: &[(usize, NodeSpec)]) -> Tree {
    let n_nodes = nodes.len();
    let mut slots: Vec<Option<NodeSpec>> = vec![None; n_nodes];
    for &(id, spec) in nodes {
        assert!(id < n_nodes, "node id {id} outside 0..{n_nodes}");
        assert!(slots[id].is_none(), "node id {id} given twice");
        slots[id] = Some(spec);
    }

    let mut split_indices = Vec::with_capacity(n_nodes);
    let mut split_thresholds = Vec::with_capacity(n_nodes);
    let mut left_children = Vec::with_capacity(n_nodes);
    let mut right_children = Vec::with_capacity(n_nodes);
    let mut is_leaf = Vec::with_capacity(n_nodes);
    let mut base_weights = Vec::with_capacity(n_nodes);

    for spec in slots.into_iter().flatten() {
        match spec {
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                split_indices.push(feature);
                split_thresholds.push(threshold);
                left_children.push(left);
                right_children.push(right);
                is_leaf.push(false);
                base_weights.push(0.0);
            }
            NodeSpec::Leaf(weight) => {
                split_indices.push(0);
                split_thresholds.push(0.0);
                left_children.push(0);
                right_children.push(0);
                is_leaf.push(true);
                base_weights.push(weight);
            }
        }
    }

    Tree::new(
        split_indices,
        split_thresholds,
        left_children,
        right_children,
        is_leaf,
        base_weights,
    )
}

/// Build a [`Tree`](crate::repr::gbdt::Tree) from a node listing.
///
/// ```
/// # use diabetes_gbdt::scalar_tree;
/// let tree = scalar_tree! {
///     0 => num(4, 0.0) -> 1, 2,
///     1 => leaf(-0.4),
///     2 => leaf(0.6),
/// };
/// assert_eq!(tree.n_nodes(), 3);
/// ```
#[macro_export]
macro_rules! scalar_tree {
    (@node num ($feature:expr, $threshold:expr) -> $left:literal, $right:literal) => {
        $crate::testing::NodeSpec::Split {
            feature: $feature,
            threshold: $threshold,
            left: $left,
            right: $right,
        }
    };
    (@node leaf ($weight:expr)) => {
        $crate::testing::NodeSpec::Leaf($weight)
    };
    ($($id:literal => $kind:ident ($($arg:expr),*) $(-> $left:literal, $right:literal)?),+ $(,)?) => {
        $crate::testing::tree_from_nodes(&[
            $(($id, $crate::scalar_tree!(@node $kind ($($arg),*) $(-> $left, $right)?))),+
        ])
    };
}

// =============================================================================
// Fixtures
// =============================================================================

/// Directory holding the reference artifact set used across tests.
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases/diabetes")
}

/// Parse the reference artifact set.
///
/// # Panics
///
/// Panics if the fixture files are missing or unparsable.
pub fn fixture_sources() -> ArtifactSources {
    let dir = fixture_dir();
    ArtifactSources::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read fixtures in {}: {e}", dir.display()))
}
