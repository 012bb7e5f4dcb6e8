//! Test case loading utilities for integration tests.
//!
//! For assertion helpers, use `diabetes_gbdt::testing`.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[allow(unused_imports)]
pub use diabetes_gbdt::assert_approx_eq;
#[allow(unused_imports)]
pub use diabetes_gbdt::testing::{DEFAULT_TOLERANCE, fixture_dir, fixture_sources};

// =============================================================================
// Test Case Loading
// =============================================================================

/// Base directory for test cases.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Load a JSON file and deserialize it.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> T {
    let file =
        File::open(path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
    serde_json::from_reader(file)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

// =============================================================================
// Reference Cases
// =============================================================================

/// One request with its hand-computed outputs.
#[derive(Debug, Deserialize)]
pub struct ReferenceCase {
    pub name: String,
    /// Request body as sent to `/predict`.
    pub input: Value,
    /// Standardized feature vector in model order.
    pub features: Vec<f64>,
    pub log_odds: f64,
    pub probability: f64,
    pub class: u8,
    pub result: String,
    pub confidence: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceCases {
    cases: Vec<ReferenceCase>,
}

/// Load `tests/test-cases/diabetes/cases.json`.
pub fn reference_cases() -> Vec<ReferenceCase> {
    load_json::<ReferenceCases>(&fixture_dir().join("cases.json")).cases
}

/// Copy the fixture artifact set into `dir`.
pub fn copy_fixtures(dir: &Path) {
    for file in [
        diabetes_gbdt::artifacts::MODEL_FILE,
        diabetes_gbdt::artifacts::SCALER_FILE,
        diabetes_gbdt::artifacts::ENCODER_FILE,
        diabetes_gbdt::artifacts::MEANS_FILE,
    ] {
        std::fs::copy(fixture_dir().join(file), dir.join(file))
            .unwrap_or_else(|e| panic!("Failed to copy {file}: {e}"));
    }
}
