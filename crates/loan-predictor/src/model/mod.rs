//! Persisted scaler and classifier artifacts behind capability traits.
//!
//! The scoring pipeline never inspects the artifacts: anything implementing
//! [`FeatureScaler`] and [`LoanClassifier`] can stand in, whether a
//! deserialized trained model, a rule-based stub, or a test double.

pub mod classifier;
pub mod loader;
pub mod scaler;

pub use classifier::{ClassifierArtifact, ClassifierFamily, ForestClassifier, LogisticClassifier};
pub use loader::{load_context, ArtifactError, CLASSIFIER_FILE, SCALER_FILE};
pub use scaler::{ScalerArtifact, StandardScaler};

use crate::scoring::features::FEATURE_COUNT;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fitted preprocessing step applied before classification.
pub trait FeatureScaler: std::fmt::Debug + Send + Sync {
    fn transform(
        &self,
        columns: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; FEATURE_COUNT], InferenceError>;
}

/// Trained binary classifier over the scaled feature columns.
///
/// Class order is an artifact contract the process cannot verify: label 0
/// rejects, label 1 approves, and `predict_proba` is ordered
/// `[rejected, approved]`.
pub trait LoanClassifier: std::fmt::Debug + Send + Sync {
    fn predict(&self, columns: &[f64; FEATURE_COUNT]) -> Result<u8, InferenceError>;

    fn predict_proba(&self, columns: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], InferenceError>;
}

/// Internal scaling or prediction failure, surfaced as a server error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("scaler rejected the feature vector: {0}")]
    Transform(String),
    #[error("classifier rejected the feature vector: {0}")]
    Predict(String),
}

/// Provenance details recorded when artifacts are loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_version: String,
    pub family: ModelFamily,
    pub trained_at: Option<DateTime<Utc>>,
    pub loaded_at: DateTime<Utc>,
}

/// Classifier families the loader knows how to reconstruct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Logistic,
    RandomForest,
}

impl ModelFamily {
    pub const fn label(self) -> &'static str {
        match self {
            ModelFamily::Logistic => "logistic",
            ModelFamily::RandomForest => "random_forest",
        }
    }
}
