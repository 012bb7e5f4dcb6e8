//! Diabetes risk model: feature pipeline plus tree ensemble.

use std::path::Path;

use ndarray::{Array2, aview1};
use serde_json::Value;

use crate::Parallelism;
use crate::artifacts::Artifacts;
use crate::error::Result;
use crate::features::{FeaturePipeline, FeatureVector, N_FEATURES, RawInput};
use crate::inference::{Prediction, Predictor};
use crate::repr::gbdt::Forest;

/// Immutable prediction context.
///
/// Built once at startup and shared read-only (usually behind an `Arc`) by
/// every request. Nothing in here is mutated after construction.
///
/// # Example
///
/// ```ignore
/// use diabetes_gbdt::{RawInput, RiskModel};
///
/// let model = RiskModel::load_dir("artifacts")?;
/// let prediction = model.predict(&input)?;
/// println!("{} ({:.1}%)", prediction.class.label(), prediction.probability * 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct RiskModel {
    forest: Forest,
    pipeline: FeaturePipeline,
}

impl RiskModel {
    /// Wrap validated artifacts.
    ///
    /// The forest is validated again against the pipeline's width, so
    /// hand-assembled [`Artifacts`] get the same checks as loaded ones.
    pub fn from_artifacts(artifacts: Artifacts) -> Result<Self> {
        artifacts.forest.validate(N_FEATURES)?;
        let (forest, pipeline) = artifacts.into_parts();
        Ok(Self { forest, pipeline })
    }

    /// Load and validate the artifacts stored in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_artifacts(Artifacts::load_dir(dir)?)
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn pipeline(&self) -> &FeaturePipeline {
        &self.pipeline
    }

    /// Normalized category labels accepted for `gender`, in class order.
    pub fn gender_labels(&self) -> &[String] {
        self.pipeline.encoder().labels()
    }

    #[inline]
    pub fn predictor(&self) -> Predictor<'_> {
        Predictor::new(&self.forest)
    }

    /// Score an already prepared feature vector.
    pub fn predict_features(&self, features: &FeatureVector) -> Result<Prediction> {
        self.predictor().predict_row(features.as_slice())
    }

    /// Validate, prepare and score one request.
    pub fn predict(&self, input: &RawInput) -> Result<Prediction> {
        let features = self.pipeline.prepare(input)?;
        self.predict_features(&features)
    }

    /// Parse, validate, prepare and score a JSON request body.
    pub fn predict_json(&self, body: &Value) -> Result<Prediction> {
        self.predict(&RawInput::from_json(body)?)
    }

    /// Score many requests. One result per input, in input order.
    ///
    /// Rows that fail validation keep their own error and do not affect the
    /// other rows.
    pub fn predict_batch(
        &self,
        inputs: &[RawInput],
        parallelism: Parallelism,
    ) -> Vec<Result<Prediction>> {
        let prepared = parallelism.maybe_par_map(inputs, |input| self.pipeline.prepare(input));

        // Rejected rows stay zero; their scores are discarded below.
        let mut rows = Array2::<f64>::zeros((prepared.len(), N_FEATURES));
        for (mut row, features) in rows.outer_iter_mut().zip(&prepared) {
            if let Ok(features) = features {
                row.assign(&aview1(features.as_slice()));
            }
        }

        let scored = self.predictor().predict_batch(rows.view(), parallelism);
        prepared
            .into_iter()
            .zip(scored)
            .map(|(features, prediction)| features.and(prediction))
            .collect()
    }
}
