//! Label encoding for categorical inputs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{ModelError, Result};

/// On-disk form of a fitted label encoder: `{"classes": ["F", "M"]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncoderSource {
    #[serde(default)]
    pub classes: Vec<String>,
}

/// Maps case-normalized labels to the index the model was trained with.
///
/// Built from the encoder's ordered class list: `classes[i].to_uppercase() -> i`.
/// When two classes collide after upper-casing, the later position wins.
/// Lookup is total: labels never seen in training encode as `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEncoder {
    index: HashMap<String, usize>,
    /// Distinct normalized labels, in first-seen class order.
    labels: Vec<String>,
}

impl CategoryEncoder {
    /// Index assigned to labels outside the training vocabulary.
    pub const FALLBACK_INDEX: usize = 0;

    /// Build from an ordered class list.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = HashMap::new();
        let mut labels = Vec::new();
        for (i, class) in classes.into_iter().enumerate() {
            let key = class.as_ref().to_uppercase();
            if index.insert(key.clone(), i).is_none() {
                labels.push(key);
            }
        }
        Self { index, labels }
    }

    /// Build from a parsed artifact, rejecting an empty class list.
    pub fn from_source(source: &EncoderSource) -> Result<Self> {
        if source.classes.is_empty() {
            return Err(ModelError::invalid_artifact(
                "category encoder",
                "`classes` is empty",
            ));
        }
        Ok(Self::new(&source.classes))
    }

    /// Encode `label`, falling back to [`FALLBACK_INDEX`](Self::FALLBACK_INDEX)
    /// for labels the encoder has never seen.
    #[inline]
    pub fn encode(&self, label: &str) -> usize {
        self.index
            .get(&label.to_uppercase())
            .copied()
            .unwrap_or(Self::FALLBACK_INDEX)
    }

    /// Normalized labels, for rendering choices to users.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
