use tracing::error;

use super::domain::{LoanApplication, LoanAssessment, ValidationError};
use super::features::FeatureVector;
use super::inference::InferenceContext;
use super::recommendation::recommendation;
use super::risk::risk_level;
use crate::model::{InferenceError, ModelMetadata};

/// Runs the encode, scale, classify, risk, recommend pipeline per request.
///
/// The service is stateless beyond the startup-loaded context; a degraded
/// instance (no artifacts) keeps serving and fails each evaluation with
/// [`PredictionError::ModelUnavailable`].
pub struct LoanScoringService {
    context: Option<InferenceContext>,
}

impl LoanScoringService {
    pub fn new(context: InferenceContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    /// Service without loaded artifacts, used when startup loading failed.
    pub fn degraded() -> Self {
        Self { context: None }
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.context.as_ref().map(InferenceContext::metadata)
    }

    pub fn evaluate(
        &self,
        application: &LoanApplication,
    ) -> Result<LoanAssessment, PredictionError> {
        let features = FeatureVector::from_application(application)?;

        let context = self
            .context
            .as_ref()
            .ok_or(PredictionError::ModelUnavailable)?;

        let inference = match context.infer(&features) {
            Ok(inference) => inference,
            Err(err) => {
                error!(error = %err, "inference failed on a validated application");
                return Err(PredictionError::Inference(err));
            }
        };

        let risk = risk_level(application, inference.approval_probability);
        let advice = recommendation(inference.decision, inference.approval_probability, risk);

        Ok(LoanAssessment::new(
            inference.decision,
            inference.approval_probability,
            risk,
            advice,
        ))
    }
}

/// Error raised while scoring one application.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("models not loaded")]
    ModelUnavailable,
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
