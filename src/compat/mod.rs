//! External format compatibility loaders.
//!
//! This module parses models trained in external frameworks and converts them
//! to native tree types.

pub mod xgboost;

pub use xgboost::XgbModel;
