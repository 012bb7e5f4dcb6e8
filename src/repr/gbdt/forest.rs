//! Canonical forest representation (collection of trees).

use crate::error::{ModelError, Result};

use super::Tree;

/// Forest of decision trees.
///
/// A binary-logistic ensemble: every tree contributes to a single output
/// group, and the prediction is the sum of one leaf weight per tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Get a reference to a specific tree.
    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    /// Iterate over trees.
    pub fn trees(&self) -> impl ExactSizeIterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Total number of nodes across all trees.
    pub fn n_nodes(&self) -> usize {
        self.trees.iter().map(Tree::n_nodes).sum()
    }

    /// Validate every tree against rows of `n_features` values.
    ///
    /// Fails with [`ModelError::EmptyEnsemble`] for a forest without trees and
    /// with [`ModelError::MalformedModel`] naming the first broken tree.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| ModelError::MalformedModel { tree: i, source: e })?;
        }

        Ok(())
    }
}

impl FromIterator<Tree> for Forest {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        Self {
            trees: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::gbdt::TreeValidationError;

    #[test]
    fn empty_forest_fails_validation() {
        let forest = Forest::new();
        assert!(forest.is_empty());
        assert!(matches!(forest.validate(11), Err(ModelError::EmptyEnsemble)));
    }

    #[test]
    fn collects_trees_in_order() {
        let forest: Forest = [0.2, -0.1, 0.4].into_iter().map(Tree::leaf).collect();
        assert_eq!(forest.n_trees(), 3);
        assert_eq!(forest.n_nodes(), 3);
        assert_eq!(forest.tree(1).base_weight(0), -0.1);
        assert!(forest.validate(11).is_ok());
    }

    #[test]
    fn reports_index_of_broken_tree() {
        let mut forest = Forest::new();
        forest.push_tree(Tree::leaf(0.1));
        forest.push_tree(crate::scalar_tree! {
            0 => num(20, 0.5) -> 1, 2,
            1 => leaf(1.0),
            2 => leaf(2.0),
        });

        match forest.validate(11) {
            Err(ModelError::MalformedModel { tree, source }) => {
                assert_eq!(tree, 1);
                assert!(matches!(source, TreeValidationError::FeatureOutOfRange { feature: 20, .. }));
            }
            other => panic!("expected MalformedModel, got {other:?}"),
        }
    }
}
