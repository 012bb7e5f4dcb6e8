//! Mean imputation for columns the caller never supplies.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, Result};

/// On-disk form: a flat `{"Urea": 5.1, "Cr": 68.9, ...}` object.
///
/// Values are kept as raw JSON so that unrelated, non-numeric columns in the
/// file do not prevent loading.
pub type ImputationSource = BTreeMap<String, Value>;

/// Number of imputed columns.
pub const N_IMPUTED: usize = 5;

/// Columns filled from training-set means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImputedFeature {
    Urea,
    Cr,
    Hdl,
    Ldl,
    Vldl,
}

impl ImputedFeature {
    pub const ALL: [ImputedFeature; N_IMPUTED] = [
        ImputedFeature::Urea,
        ImputedFeature::Cr,
        ImputedFeature::Hdl,
        ImputedFeature::Ldl,
        ImputedFeature::Vldl,
    ];

    /// Column name as it appears in the means file.
    pub fn name(self) -> &'static str {
        match self {
            ImputedFeature::Urea => "Urea",
            ImputedFeature::Cr => "Cr",
            ImputedFeature::Hdl => "HDL",
            ImputedFeature::Ldl => "LDL",
            ImputedFeature::Vldl => "VLDL",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Resolved default values for every [`ImputedFeature`].
///
/// Lookups cannot fail: presence is checked once, at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationMeans {
    values: [f64; N_IMPUTED],
}

impl ImputationMeans {
    /// Build from explicit values, in [`ImputedFeature::ALL`] order.
    pub fn new(values: [f64; N_IMPUTED]) -> Self {
        Self { values }
    }

    /// Build from a parsed means file.
    ///
    /// Every [`ImputedFeature`] must be present as a finite number. Other
    /// columns are ignored.
    pub fn from_source(source: &ImputationSource) -> Result<Self> {
        let mut values = [0.0; N_IMPUTED];
        for feature in ImputedFeature::ALL {
            let name = feature.name();
            let value = source.get(name).and_then(Value::as_f64).ok_or_else(|| {
                ModelError::invalid_artifact(
                    "imputation means",
                    format!("missing numeric value for `{name}`"),
                )
            })?;
            if !value.is_finite() {
                return Err(ModelError::invalid_artifact(
                    "imputation means",
                    format!("value for `{name}` is not finite"),
                ));
            }
            values[feature.slot()] = value;
        }

        let ignored = source.len().saturating_sub(N_IMPUTED);
        debug!(ignored, "imputation means resolved");
        Ok(Self { values })
    }

    /// Default for an imputed column.
    #[inline]
    pub fn value(&self, feature: ImputedFeature) -> f64 {
        self.values[feature.slot()]
    }
}
