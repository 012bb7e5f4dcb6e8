//! XGBoost JSON model format support.
//!
//! This module provides parsing of XGBoost's JSON model format and conversion
//! to native [`Forest`](crate::repr::gbdt::Forest) types.

mod convert;
mod json;

pub use json::*;
