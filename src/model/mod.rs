//! High-level model wrapper for inference.
//!
//! [`RiskModel`] bundles the validated ensemble with its feature pipeline and
//! is the main public API for prediction.

mod risk;
pub mod transform;

pub use risk::RiskModel;
pub use transform::{DECISION_THRESHOLD, RiskClass, sigmoid};
