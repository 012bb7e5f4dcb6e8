//! Canonical tree representation (SoA) and structural validation.
//!
//! A [`Tree`] is an arena of nodes addressed by [`NodeId`]; node 0 is the root.
//! Children are plain indices into the same arrays, so the representation has
//! no pointer cycles and maps one-to-one onto XGBoost's parallel JSON arrays.
//!
//! Internal nodes keep the base weight the source format stores for them, but
//! traversal never reads it: only leaf weights contribute to a prediction.

use super::NodeId;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,
    /// A node array does not have one entry per node.
    #[error("array `{field}` has {len} entries but the tree has {n_nodes} nodes")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        n_nodes: usize,
    },
    /// The declared node count disagrees with the node arrays.
    #[error("tree declares {declared} nodes but stores {actual}")]
    NodeCountMismatch { declared: i64, actual: usize },
    /// The declared input width disagrees with the rows the model will see.
    #[error("tree was trained on {declared} features but rows have {n_features}")]
    FeatureCountMismatch { declared: i64, n_features: usize },
    /// A child pointer references an out-of-bounds node.
    #[error("node {node} has {side} child {child} outside 0..{n_nodes}")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: i64,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path.
    #[error("node {node} has more than one parent")]
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },
    /// A split references a feature the model input does not have.
    #[error("node {node} splits on feature {feature} but rows have {n_features} features")]
    FeatureOutOfRange {
        node: NodeId,
        feature: i64,
        n_features: usize,
    },
    /// A reachable leaf weight or split threshold is not a usable number.
    #[error("node {node} has non-finite {field} {value}")]
    NonFiniteValue {
        node: NodeId,
        field: &'static str,
        value: f64,
    },
    /// Traversal did not reach a leaf within `steps` moves.
    #[error("no leaf reached after {steps} steps")]
    TraversalLimit { steps: usize },
}

/// Structure-of-Arrays tree storage for efficient traversal.
///
/// Stores tree nodes in flat arrays for cache-friendly traversal.
/// Child indices are local to this tree (0 = root).
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f64]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    is_leaf: Box<[bool]>,
    base_weights: Box<[f64]>,
}

impl Tree {
    /// Create a new tree from parallel arrays.
    ///
    /// Arrays are indexed by node id; `is_leaf` defines the node count. Split
    /// and child entries of leaf nodes are ignored. Nothing is checked here;
    /// call [`validate`](Self::validate) before serving predictions.
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f64>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
        is_leaf: Vec<bool>,
        base_weights: Vec<f64>,
    ) -> Self {
        Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            base_weights: base_weights.into_boxed_slice(),
        }
    }

    /// A tree whose root is a leaf.
    pub fn leaf(weight: f64) -> Self {
        Self::new(vec![0], vec![0.0], vec![0], vec![0], vec![true], vec![weight])
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f64 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    /// Weight stored at `node`. Only meaningful for leaves.
    #[inline]
    pub fn base_weight(&self, node: NodeId) -> f64 {
        self.base_weights[node as usize]
    }

    /// Iterate over the weights of all leaf nodes, reachable or not.
    pub fn leaf_weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.is_leaf
            .iter()
            .zip(self.base_weights.iter())
            .filter(|(leaf, _)| **leaf)
            .map(|(_, &w)| w)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check that the tree has nodes and one entry per node in every array.
    ///
    /// This is the part of [`validate`](Self::validate) that makes indexing by
    /// any in-range `NodeId` safe.
    pub fn check_shape(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }
        let lengths = [
            ("split_indices", self.split_indices.len()),
            ("split_thresholds", self.split_thresholds.len()),
            ("left_children", self.left_children.len()),
            ("right_children", self.right_children.len()),
            ("base_weights", self.base_weights.len()),
        ];
        for (field, len) in lengths {
            if len != n_nodes {
                return Err(TreeValidationError::LengthMismatch {
                    field,
                    len,
                    n_nodes,
                });
            }
        }
        Ok(())
    }

    /// Validate structural invariants for this tree.
    ///
    /// Every node array must hold one entry per node. Every node reachable
    /// from the root must be a leaf with a finite weight or a split with a
    /// finite threshold, a feature index below `n_features`,
    /// and two in-bounds children. The reachable graph must be a tree: no
    /// cycles, no node with two parents. Unreachable node slots (pruned nodes
    /// in XGBoost dumps) are allowed.
    pub fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        self.check_shape()?;
        let n_nodes = self.n_nodes();

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            if phase == 1 {
                color[node_usize] = 2;
                continue;
            }

            match color[node_usize] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[node_usize] = 1;
            stack.push((node, 1));

            if self.is_leaf(node) {
                let weight = self.base_weight(node);
                if !weight.is_finite() {
                    return Err(TreeValidationError::NonFiniteValue {
                        node,
                        field: "leaf weight",
                        value: weight,
                    });
                }
                continue;
            }

            let feature = self.split_index(node);
            if feature as usize >= n_features {
                return Err(TreeValidationError::FeatureOutOfRange {
                    node,
                    feature: i64::from(feature),
                    n_features,
                });
            }
            let threshold = self.split_threshold(node);
            if !threshold.is_finite() {
                return Err(TreeValidationError::NonFiniteValue {
                    node,
                    field: "split threshold",
                    value: threshold,
                });
            }

            let left = self.left_child(node);
            let right = self.right_child(node);
            if left == node || right == node {
                return Err(TreeValidationError::SelfLoop { node });
            }
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child: i64::from(child),
                        n_nodes,
                    });
                }
            }

            // Visit children
            stack.push((right, 0));
            stack.push((left, 0));
        }

        Ok(())
    }
}
