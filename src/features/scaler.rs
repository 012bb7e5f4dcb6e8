//! Z-score standardization with offline-fitted statistics.

use ndarray::{Array1, ArrayView1, Zip};
use serde::Deserialize;

use crate::error::{ModelError, Result};

use super::{FeatureVector, N_FEATURES};

/// On-disk form of a fitted standard scaler.
///
/// Extra fields written by the fitting library (`var`, `n_samples_seen`, ...)
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScalerSource {
    #[serde(default)]
    pub mean: Vec<f64>,
    #[serde(default)]
    pub scale: Vec<f64>,
}

/// Per-feature `(x - mean) / scale`, positionally aligned with the feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl Scaler {
    /// Build from explicit statistics.
    ///
    /// Both arrays must have [`N_FEATURES`] finite entries and no scale may be zero.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        for (name, values) in [("mean", &mean), ("scale", &scale)] {
            if values.len() != N_FEATURES {
                return Err(ModelError::invalid_artifact(
                    "scaler",
                    format!("`{name}` has {} entries, expected {N_FEATURES}", values.len()),
                ));
            }
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(ModelError::invalid_artifact(
                    "scaler",
                    format!("`{name}[{i}]` is not finite"),
                ));
            }
        }
        if let Some(i) = scale.iter().position(|&s| s == 0.0) {
            return Err(ModelError::invalid_artifact(
                "scaler",
                format!("`scale[{i}]` is zero"),
            ));
        }

        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    /// Build from a parsed scaler artifact.
    pub fn from_source(source: &ScalerSource) -> Result<Self> {
        Self::new(source.mean.clone(), source.scale.clone())
    }

    /// Mean 0, scale 1: output equals input.
    pub fn identity() -> Self {
        Self {
            mean: Array1::zeros(N_FEATURES),
            scale: Array1::ones(N_FEATURES),
        }
    }

    pub fn mean(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }

    /// Standardize an assembled raw row.
    pub fn transform(&self, raw: &[f64; N_FEATURES]) -> FeatureVector {
        let mut scaled = [0.0; N_FEATURES];
        Zip::from(&mut scaled[..])
            .and(&raw[..])
            .and(&self.mean)
            .and(&self.scale)
            .for_each(|out, &x, &m, &s| *out = (x - m) / s);
        FeatureVector::new(scaled)
    }
}
