//! GBDT (Gradient Boosted Decision Trees) inference.
//!
//! - [`traverse_to_leaf`] / [`evaluate`]: walk one tree for one row
//! - [`Predictor`]: sum every tree's leaf weight and apply the logistic link
//!
//! # Split semantics
//!
//! A row goes LEFT when `row[feature] < threshold` and RIGHT otherwise. There
//! is no missing-value direction: NaN never compares less, so it goes right.

mod predictor;
mod traversal;

pub use predictor::{Prediction, Predictor};
pub use traversal::{evaluate, traverse_to_leaf};
