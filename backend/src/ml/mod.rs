//! Crop classifier artifact
//!
//! The model is loaded once before the listener starts and is read-only
//! afterwards, so it is shared across requests behind an `Arc` without locking.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

mod forest;

pub use forest::{DecisionForest, Node, Tree, FEATURE_NAMES};

/// A pre-trained classifier mapping (temperature, humidity, rainfall) to a crop label
pub trait CropModel: Send + Sync {
    /// Predict the top label for features ordered as [`FEATURE_NAMES`]
    fn predict(&self, features: [f64; 3]) -> String;

    /// Labels the model can emit
    fn classes(&self) -> &[String];

    /// Number of trees (or equivalent estimators) voting on each prediction
    fn estimators(&self) -> usize;
}

/// Errors raised while loading the artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode model artifact: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("model artifact digest mismatch: expected {expected}, found {actual}")]
    DigestMismatch { expected: String, actual: String },
}

/// Loaded model plus the facts worth reporting about it
pub struct LoadedModel {
    pub model: DecisionForest,
    pub summary: ModelSummary,
}

/// Description of the loaded artifact, exposed on `/health`
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub classes: Vec<String>,
    pub trees: usize,
    pub sha256: String,
}

/// Read, verify, and decode the artifact at `path`.
///
/// When `expected_sha256` is set, the artifact bytes must hash to it.
pub fn load_model(path: &Path, expected_sha256: Option<&str>) -> Result<LoadedModel, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let actual = format!("{:x}", Sha256::digest(&bytes));
    if let Some(expected) = expected_sha256 {
        let expected = expected.trim().to_ascii_lowercase();
        if expected != actual {
            return Err(ModelError::DigestMismatch { expected, actual });
        }
    }

    let model = DecisionForest::from_slice(&bytes)?;
    let summary = ModelSummary {
        classes: model.classes().to_vec(),
        trees: model.estimators(),
        sha256: actual,
    };

    Ok(LoadedModel { model, summary })
}
