//! diabetes-gbdt: diabetes risk scoring with a pretrained XGBoost ensemble.
//!
//! Six clinical inputs are encoded, mean-imputed and standardized into an
//! eleven-feature vector, scored by summing one leaf weight per tree, and
//! mapped through the logistic sigmoid to a probability and a Yes/No class.
//!
//! # Key Types
//!
//! - [`RiskModel`] - Immutable prediction context (ensemble + feature pipeline)
//! - [`repr::gbdt::Forest`] / [`repr::gbdt::Tree`] - SoA tree storage
//! - [`inference::Predictor`] - Ensemble aggregation over a borrowed forest
//! - [`features::FeaturePipeline`] - Raw input to [`features::FeatureVector`]
//!
//! # Loading
//!
//! [`RiskModel::load_dir`] reads the four JSON artifacts described in
//! [`artifacts`] and validates every tree before the first prediction.
//! See [`compat::xgboost`] for the model format.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod artifacts;
pub mod compat;
pub mod error;
pub mod features;
pub mod inference;
pub mod model;
pub mod repr;
pub mod server;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use artifacts::{ArtifactSources, Artifacts, load_artifacts};
pub use error::{ModelError, Result};
pub use features::{FeatureVector, RawInput};
pub use inference::{Prediction, Predictor};
pub use model::{RiskClass, RiskModel};
pub use utils::{Parallelism, run_with_threads};
