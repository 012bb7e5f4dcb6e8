//! Feature preparation: from six clinical inputs to the model's feature vector.
//!
//! The ensemble was trained on eleven columns, in this order:
//!
//! | pos | name  | source                          |
//! |-----|-------|---------------------------------|
//! | 0   | Gender| [`CategoryEncoder`] of `gender` |
//! | 1   | AGE   | `age`                           |
//! | 2   | Urea  | imputed mean                    |
//! | 3   | Cr    | imputed mean                    |
//! | 4   | HbA1c | `hba1c`                         |
//! | 5   | Chol  | `chol`                          |
//! | 6   | TG    | `tg`                            |
//! | 7   | HDL   | imputed mean                    |
//! | 8   | LDL   | imputed mean                    |
//! | 9   | VLDL  | imputed mean                    |
//! | 10  | BMI   | `bmi`                           |
//!
//! Every position is then standardized with the [`Scaler`].

mod encoder;
mod imputation;
mod input;
mod pipeline;
mod scaler;

pub use encoder::{CategoryEncoder, EncoderSource};
pub use imputation::{ImputationMeans, ImputationSource, ImputedFeature};
pub use input::{FieldRange, RawInput};
pub use pipeline::FeaturePipeline;
pub use scaler::{Scaler, ScalerSource};

/// Number of features the ensemble consumes.
pub const N_FEATURES: usize = 11;

/// Column names in model order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Gender", "AGE", "Urea", "Cr", "HbA1c", "Chol", "TG", "HDL", "LDL", "VLDL", "BMI",
];

/// A complete, fixed-order row of model inputs.
///
/// Created per request and discarded after scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    #[inline]
    pub fn new(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pair each value with its column name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl std::ops::Index<usize> for FeatureVector {
    type Output = f64;

    #[inline]
    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
