//! Raw input → encoded, imputed, standardized [`FeatureVector`].

use crate::error::Result;

use super::{
    CategoryEncoder, FeatureVector, ImputationMeans, ImputedFeature, N_FEATURES, RawInput, Scaler,
};

/// Owns the fitted preprocessing artifacts and applies them in model order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePipeline {
    encoder: CategoryEncoder,
    means: ImputationMeans,
    scaler: Scaler,
}

impl FeaturePipeline {
    pub fn new(encoder: CategoryEncoder, means: ImputationMeans, scaler: Scaler) -> Self {
        Self {
            encoder,
            means,
            scaler,
        }
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn means(&self) -> &ImputationMeans {
        &self.means
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Assemble the unscaled row. Input is assumed validated.
    pub fn assemble(&self, input: &RawInput) -> [f64; N_FEATURES] {
        let impute = |feature| self.means.value(feature);
        [
            self.encoder.encode(&input.gender) as f64,
            input.age as f64,
            impute(ImputedFeature::Urea),
            impute(ImputedFeature::Cr),
            input.hba1c,
            input.cholesterol,
            input.triglycerides,
            impute(ImputedFeature::Hdl),
            impute(ImputedFeature::Ldl),
            impute(ImputedFeature::Vldl),
            input.bmi,
        ]
    }

    /// Validate, assemble and standardize one request.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidInput`](crate::ModelError::InvalidInput) if a value
    /// is non-finite or out of range. Nothing is encoded or imputed before
    /// validation passes.
    pub fn prepare(&self, input: &RawInput) -> Result<FeatureVector> {
        input.validate()?;
        Ok(self.scaler.transform(&self.assemble(input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    fn pipeline(scaler: Scaler) -> FeaturePipeline {
        FeaturePipeline::new(
            CategoryEncoder::new(["F", "M"]),
            ImputationMeans::new([5.12, 68.94, 1.2, 2.6, 1.85]),
            scaler,
        )
    }

    fn input() -> RawInput {
        RawInput {
            age: 55,
            gender: "m".into(),
            hba1c: 9.5,
            bmi: 33.0,
            cholesterol: 5.2,
            triglycerides: 2.1,
        }
    }

    #[test]
    fn assembles_in_model_order() {
        let raw = pipeline(Scaler::identity()).assemble(&input());
        assert_eq!(
            raw,
            [1.0, 55.0, 5.12, 68.94, 9.5, 5.2, 2.1, 1.2, 2.6, 1.85, 33.0]
        );
    }

    #[test]
    fn identity_scaler_returns_assembled_row() {
        let p = pipeline(Scaler::identity());
        let fv = p.prepare(&input()).unwrap();
        assert_eq!(fv, FeatureVector::new(p.assemble(&input())));
    }

    #[test]
    fn unknown_gender_uses_first_class() {
        let p = pipeline(Scaler::identity());
        let unknown = RawInput { gender: "unspecified".into(), ..input() };
        let female = RawInput { gender: "F".into(), ..input() };
        assert_eq!(p.prepare(&unknown).unwrap(), p.prepare(&female).unwrap());
        assert_eq!(p.prepare(&unknown).unwrap()[0], 0.0);
    }

    #[test]
    fn standardizes_after_assembly() {
        let mean = vec![0.5, 50.0, 5.0, 68.0, 8.0, 4.8, 2.3, 1.2, 2.6, 1.8, 29.0];
        let scale = vec![0.5, 9.0, 3.0, 60.0, 2.5, 1.3, 1.4, 0.6, 1.1, 3.6, 5.0];
        let p = pipeline(Scaler::new(mean.clone(), scale.clone()).unwrap());

        let raw = p.assemble(&input());
        let fv = p.prepare(&input()).unwrap();
        for (i, (name, value)) in fv.named().enumerate() {
            assert_eq!(value, (raw[i] - mean[i]) / scale[i], "feature {name}");
        }
        assert_eq!(fv[0], 1.0);
        assert_eq!(fv[10], 0.8);
    }

    #[test]
    fn prepare_is_deterministic() {
        let p = pipeline(Scaler::identity());
        let a = p.prepare(&input()).unwrap();
        let b = p.prepare(&input()).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn rejects_before_encoding() {
        let p = pipeline(Scaler::identity());
        let bad = RawInput { bmi: f64::INFINITY, ..input() };
        assert!(matches!(
            p.prepare(&bad),
            Err(ModelError::InvalidInput { field: "bmi", .. })
        ));
    }
}
