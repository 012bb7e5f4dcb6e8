//! Ensemble predictor for binary logistic tree ensembles.
//!
//! # Usage
//!
//! ```ignore
//! use diabetes_gbdt::inference::Predictor;
//!
//! let predictor = Predictor::new(&forest);
//! let prediction = predictor.predict_row(features.as_slice())?;
//! println!("p = {:.3}, class = {}", prediction.probability, prediction.class.as_u8());
//! ```

use ndarray::ArrayView2;
use serde::Serialize;

use crate::Parallelism;
use crate::error::{ModelError, Result};
use crate::model::transform::{RiskClass, sigmoid};
use crate::repr::gbdt::Forest;

use super::evaluate;

/// Outcome of scoring one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// `Positive` iff `probability > 0.5`.
    pub class: RiskClass,
    /// Sigmoid of `log_odds`, in `[0, 1]`.
    pub probability: f64,
    /// Sum of the leaf weights selected in every tree.
    pub log_odds: f64,
}

impl Prediction {
    /// Build a prediction from a raw ensemble margin.
    #[inline]
    pub fn from_log_odds(log_odds: f64) -> Self {
        let probability = sigmoid(log_odds);
        Self {
            class: RiskClass::from_probability(probability),
            probability,
            log_odds,
        }
    }
}

/// Predictor over a borrowed [`Forest`].
///
/// Stateless apart from the forest reference, so one predictor may serve any
/// number of threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'f> {
    forest: &'f Forest,
}

impl<'f> Predictor<'f> {
    #[inline]
    pub fn new(forest: &'f Forest) -> Self {
        Self { forest }
    }

    #[inline]
    pub fn forest(&self) -> &'f Forest {
        self.forest
    }

    /// Sum of per-tree leaf weights for one row (the log-odds).
    ///
    /// No base score is added.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyEnsemble`] for a forest without trees;
    /// [`ModelError::MalformedModel`] if any tree cannot be traversed.
    pub fn predict_margin(&self, features: &[f64]) -> Result<f64> {
        if self.forest.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }

        let mut margin = 0.0;
        for (tree_idx, tree) in self.forest.trees().enumerate() {
            margin += evaluate(tree, features).map_err(|source| ModelError::MalformedModel {
                tree: tree_idx,
                source,
            })?;
        }
        Ok(margin)
    }

    /// Score one row: margin, probability and class.
    #[inline]
    pub fn predict_row(&self, features: &[f64]) -> Result<Prediction> {
        self.predict_margin(features).map(Prediction::from_log_odds)
    }

    /// Score every row of a `(n_rows, n_features)` matrix.
    ///
    /// One result per row, in row order. Rows are independent: a failing row
    /// does not affect the others.
    pub fn predict_batch(
        &self,
        features: ArrayView2<'_, f64>,
        parallelism: Parallelism,
    ) -> Vec<Result<Prediction>> {
        parallelism.maybe_par_map(0..features.nrows(), |row_idx| {
            let row = features.row(row_idx);
            match row.as_slice() {
                Some(slice) => self.predict_row(slice),
                None => self.predict_row(&row.to_vec()),
            }
        })
    }
}
