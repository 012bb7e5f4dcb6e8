//! Load-time artifact model.
//!
//! The service needs four fitted artifacts, all JSON:
//!
//! | file                  | contents                               |
//! |-----------------------|----------------------------------------|
//! | `diabetes_model.json` | XGBoost gbtree model                   |
//! | `scaler.json`         | `{"mean": [..11], "scale": [..11]}`    |
//! | `le_gender.json`      | `{"classes": ["F", "M"]}`              |
//! | `column_means.json`   | `{"Urea": 5.1, "Cr": 68.9, ...}`       |
//!
//! Parsing ([`ArtifactSources`]) and validation ([`load_artifacts`]) are
//! separate steps so that already-parsed values can be validated without
//! touching the filesystem.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::compat::XgbModel;
use crate::error::{ModelError, Result};
use crate::features::{
    CategoryEncoder, EncoderSource, FeaturePipeline, ImputationMeans, ImputationSource, N_FEATURES,
    Scaler, ScalerSource,
};
use crate::repr::gbdt::Forest;

pub const MODEL_FILE: &str = "diabetes_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const ENCODER_FILE: &str = "le_gender.json";
pub const MEANS_FILE: &str = "column_means.json";

/// Parsed but unvalidated artifact documents.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSources {
    pub model: XgbModel,
    pub scaler: ScalerSource,
    pub encoder: EncoderSource,
    pub means: ImputationSource,
}

impl ArtifactSources {
    /// Read and parse the four artifact files from `dir`.
    pub fn read_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            model: read_json(&dir.join(MODEL_FILE))?,
            scaler: read_json(&dir.join(SCALER_FILE))?,
            encoder: read_json(&dir.join(ENCODER_FILE))?,
            means: read_json(&dir.join(MEANS_FILE))?,
        })
    }
}

/// Validated, immutable artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub forest: Forest,
    pub encoder: CategoryEncoder,
    pub means: ImputationMeans,
    pub scaler: Scaler,
}

impl Artifacts {
    /// Read, parse and validate the artifacts stored in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "loading artifacts");
        load_artifacts(&ArtifactSources::read_dir(dir)?)
    }

    /// Split into the ensemble and the preprocessing pipeline.
    pub fn into_parts(self) -> (Forest, FeaturePipeline) {
        let pipeline = FeaturePipeline::new(self.encoder, self.means, self.scaler);
        (self.forest, pipeline)
    }
}

/// Validate parsed artifacts.
///
/// The forest must be a non-empty, structurally valid gbtree ensemble over
/// [`N_FEATURES`] columns; the scaler, encoder and means must satisfy their
/// own invariants. The first violation is returned.
pub fn load_artifacts(sources: &ArtifactSources) -> Result<Artifacts> {
    let forest = sources.model.to_forest(N_FEATURES)?;
    let scaler = Scaler::from_source(&sources.scaler)?;
    let encoder = CategoryEncoder::from_source(&sources.encoder)?;
    let means = ImputationMeans::from_source(&sources.means)?;

    info!(
        n_trees = forest.n_trees(),
        n_nodes = forest.n_nodes(),
        classes = ?encoder.labels(),
        "artifacts loaded"
    );
    if let Some(objective) = sources.model.objective_name() {
        debug!(objective, version = ?sources.model.version, "model metadata");
    }

    Ok(Artifacts {
        forest,
        encoder,
        means,
        scaler,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ImputedFeature;
    use crate::testing::fixture_sources;

    #[test]
    fn loads_fixture_sources() {
        let artifacts = load_artifacts(&fixture_sources()).unwrap();
        assert_eq!(artifacts.forest.n_trees(), 3);
        assert_eq!(artifacts.encoder.labels(), ["F", "M"]);
        assert_eq!(artifacts.means.value(ImputedFeature::Vldl), 1.85);
    }

    #[test]
    fn empty_model_rejected() {
        let sources = ArtifactSources {
            model: XgbModel::default(),
            ..fixture_sources()
        };
        assert!(matches!(
            load_artifacts(&sources),
            Err(ModelError::EmptyEnsemble)
        ));
    }

    #[test]
    fn short_scaler_rejected() {
        let mut sources = fixture_sources();
        sources.scaler.mean.pop();
        assert!(matches!(
            load_artifacts(&sources),
            Err(ModelError::InvalidArtifact { artifact: "scaler", .. })
        ));
    }

    #[test]
    fn missing_mean_rejected() {
        let mut sources = fixture_sources();
        sources.means.remove("VLDL");
        assert!(matches!(
            load_artifacts(&sources),
            Err(ModelError::InvalidArtifact { artifact: "imputation means", .. })
        ));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let err = Artifacts::load_dir("/nonexistent/artifacts").unwrap_err();
        match err {
            ModelError::Io { path, .. } => assert!(path.ends_with(MODEL_FILE)),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
