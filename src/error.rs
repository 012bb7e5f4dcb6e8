//! Error taxonomy shared by loading, feature preparation and inference.
//!
//! Load-time variants ([`ModelError::MalformedModel`], [`ModelError::EmptyEnsemble`],
//! [`ModelError::InvalidArtifact`], [`ModelError::Io`], [`ModelError::Json`]) abort
//! startup. [`ModelError::InvalidInput`] is the only per-request variant; it is
//! reported back to the caller and never affects other requests.
//!
//! Unknown category labels are not an error: the encoder falls back to index 0.

use std::path::PathBuf;

use crate::repr::gbdt::TreeValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while loading artifacts or serving a prediction.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A tree violates a structural invariant (cycle, dangling index, bad weight).
    #[error("malformed model: tree {tree}: {source}")]
    MalformedModel {
        tree: usize,
        #[source]
        source: TreeValidationError,
    },

    /// The ensemble contains no trees.
    #[error("malformed model: ensemble contains no trees")]
    EmptyEnsemble,

    /// A scaler, encoder or imputation artifact violates its invariants.
    #[error("invalid {artifact} artifact: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },

    /// A request is missing a required field or carries a bad value.
    #[error("invalid input field `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ModelError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_artifact(artifact: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidArtifact {
            artifact,
            reason: reason.into(),
        }
    }

    /// Whether this error is attributable to the caller's request.
    ///
    /// Everything else is a model or deployment fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ModelError::InvalidInput { .. })
    }
}
