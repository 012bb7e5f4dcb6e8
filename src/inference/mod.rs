//! Inference for the tree ensemble.
//!
//! - [`gbdt`]: single-tree traversal and the ensemble [`Predictor`]

pub mod gbdt;

pub use gbdt::{Prediction, Predictor, evaluate, traverse_to_leaf};
