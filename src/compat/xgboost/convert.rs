//! Conversion from XGBoost JSON types to native tree types.

use crate::error::{ModelError, Result};
use crate::repr::gbdt::{Forest, NodeId, Tree, TreeValidationError};

use super::json::{Tree as XgbTree, XgbModel};

impl XgbModel {
    /// Convert to a validated native [`Forest`] for rows of `n_features`.
    ///
    /// Only `gbtree` boosters are supported; a document that does not name its
    /// booster is treated as `gbtree`. The model's `base_score` is not applied.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidArtifact`] for another booster kind.
    /// - [`ModelError::EmptyEnsemble`] when the model has no trees.
    /// - [`ModelError::MalformedModel`] naming the first tree that fails
    ///   conversion or structural validation.
    pub fn to_forest(&self, n_features: usize) -> Result<Forest> {
        if let Some(name) = self.booster_name()
            && name != "gbtree"
        {
            return Err(ModelError::invalid_artifact(
                "model",
                format!("unsupported booster `{name}`, expected `gbtree`"),
            ));
        }

        let forest = self
            .learner
            .gradient_booster
            .model
            .trees
            .iter()
            .enumerate()
            .map(|(idx, xgb_tree)| {
                convert_tree(xgb_tree, n_features)
                    .map_err(|source| ModelError::MalformedModel { tree: idx, source })
            })
            .collect::<Result<Forest>>()?;

        forest.validate(n_features)?;
        Ok(forest)
    }
}

/// Convert a single XGBoost tree to a native [`Tree`].
///
/// Checks the array shapes, the declared node and feature counts, and the
/// sign and range of every index at split nodes. Reachability is left to
/// [`Tree::validate`].
fn convert_tree(xgb_tree: &XgbTree, n_features: usize) -> std::result::Result<Tree, TreeValidationError> {
    let n_nodes = xgb_tree.left_children.len();
    if n_nodes == 0 {
        return Err(TreeValidationError::EmptyTree);
    }

    let lengths = [
        ("base_weights", xgb_tree.base_weights.len()),
        ("right_children", xgb_tree.right_children.len()),
        ("split_indices", xgb_tree.split_indices.len()),
        ("split_conditions", xgb_tree.split_conditions.len()),
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

    if let Some(param) = &xgb_tree.tree_param {
        if usize::try_from(param.num_nodes).ok() != Some(n_nodes) {
            return Err(TreeValidationError::NodeCountMismatch {
                declared: param.num_nodes,
                actual: n_nodes,
            });
        }
        if let Some(declared) = param.num_feature
            && usize::try_from(declared).ok() != Some(n_features)
        {
            return Err(TreeValidationError::FeatureCountMismatch {
                declared,
                n_features,
            });
        }
    }

    let mut split_indices = Vec::with_capacity(n_nodes);
    let mut split_thresholds = Vec::with_capacity(n_nodes);
    let mut left_children = Vec::with_capacity(n_nodes);
    let mut right_children = Vec::with_capacity(n_nodes);
    let mut is_leaf = Vec::with_capacity(n_nodes);

    for node_idx in 0..n_nodes {
        let node = node_idx as NodeId;
        let left = xgb_tree.left_children[node_idx];

        // XGBoost marks leaves with left_child == -1.
        if left == -1 {
            split_indices.push(0);
            split_thresholds.push(0.0);
            left_children.push(0);
            right_children.push(0);
            is_leaf.push(true);
            continue;
        }

        let right = xgb_tree.right_children[node_idx];
        let left = child_index(node, "left", left, n_nodes)?;
        let right = child_index(node, "right", right, n_nodes)?;

        let feature = xgb_tree.split_indices[node_idx];
        let feature_index = u32::try_from(feature)
            .ok()
            .filter(|&f| (f as usize) < n_features)
            .ok_or(TreeValidationError::FeatureOutOfRange {
                node,
                feature,
                n_features,
            })?;

        split_indices.push(feature_index);
        split_thresholds.push(xgb_tree.split_conditions[node_idx]);
        left_children.push(left);
        right_children.push(right);
        is_leaf.push(false);
    }

    Ok(Tree::new(
        split_indices,
        split_thresholds,
        left_children,
        right_children,
        is_leaf,
        xgb_tree.base_weights.clone(),
    ))
}

fn child_index(
    node: NodeId,
    side: &'static str,
    child: i64,
    n_nodes: usize,
) -> std::result::Result<NodeId, TreeValidationError> {
    usize::try_from(child)
        .ok()
        .filter(|&c| c < n_nodes)
        .map(|c| c as NodeId)
        .ok_or(TreeValidationError::ChildOutOfBounds {
            node,
            side,
            child,
            n_nodes,
        })
}
