//! XGBoost JSON model loader.
//!
//! Parses the subset of the XGBoost >= 1.0 JSON format a gbtree binary
//! classifier needs. These are "foreign types" used only for parsing; see
//! [`XgbModel::to_forest`] for the conversion to native types.
//!
//! Every level of `learner.gradient_booster.model.trees` defaults to empty, so
//! a document without that path parses into a model with no trees and is
//! rejected at conversion as an empty ensemble.

use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

// =============================================================================
// Tree / model level definitions
// =============================================================================

/// Per-tree header. XGBoost writes these counts as strings.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct TreeParam {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub num_nodes: i64,
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    #[serde(default)]
    pub num_feature: Option<i64>,
}

/// One tree as parallel arrays indexed by node id.
///
/// A node is a leaf iff `left_children[id] == -1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub tree_param: Option<TreeParam>,
    #[serde(default)]
    pub base_weights: Vec<f64>,
    #[serde(default)]
    pub left_children: Vec<i64>,
    #[serde(default)]
    pub right_children: Vec<i64>,
    #[serde(default)]
    pub split_indices: Vec<i64>,
    #[serde(default)]
    pub split_conditions: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelTrees {
    #[serde(default)]
    pub trees: Vec<Tree>,
}

// =============================================================================
// Gradient booster / learner
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradientBooster {
    /// Booster kind: `gbtree`, `dart` or `gblinear`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: ModelTrees,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Objective {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Learner {
    #[serde(default)]
    pub gradient_booster: GradientBooster,
    #[serde(default)]
    pub objective: Objective,
}

/// Root of an XGBoost JSON model document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct XgbModel {
    #[serde(default)]
    pub learner: Learner,
    /// Writer version, `[major, minor, patch]`.
    #[serde(default)]
    pub version: Vec<u32>,
}

impl XgbModel {
    /// Number of trees in this model.
    pub fn num_trees(&self) -> usize {
        self.learner.gradient_booster.model.trees.len()
    }

    pub fn booster_name(&self) -> Option<&str> {
        self.learner.gradient_booster.name.as_deref()
    }

    pub fn objective_name(&self) -> Option<&str> {
        self.learner.objective.name.as_deref()
    }
}
