use std::sync::Arc;

use super::domain::LoanDecision;
use super::features::FeatureVector;
use crate::model::{FeatureScaler, InferenceError, LoanClassifier, ModelMetadata};

/// Loaded artifacts plus provenance, constructed once at startup and shared
/// read-only by every request handler.
#[derive(Debug, Clone)]
pub struct InferenceContext {
    scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn LoanClassifier>,
    metadata: ModelMetadata,
}

impl InferenceContext {
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        classifier: Arc<dyn LoanClassifier>,
        metadata: ModelMetadata,
    ) -> Self {
        Self {
            scaler,
            classifier,
            metadata,
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Scale once, then run label and probability prediction against the same
    /// scaled columns.
    pub fn infer(&self, features: &FeatureVector) -> Result<Inference, InferenceError> {
        let scaled = self.scaler.transform(features.columns())?;
        let label = self.classifier.predict(&scaled)?;
        let proba = self.classifier.predict_proba(&scaled)?;

        let decision = if label == 1 {
            LoanDecision::Approved
        } else {
            LoanDecision::Rejected
        };

        Ok(Inference {
            decision,
            approval_probability: proba[1],
        })
    }
}

/// Classifier output before risk tiering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference {
    pub decision: LoanDecision,
    pub approval_probability: f64,
}
