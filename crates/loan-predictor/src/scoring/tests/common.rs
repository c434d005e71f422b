use std::sync::Arc;

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::model::{FeatureScaler, InferenceError, LoanClassifier, ModelFamily, ModelMetadata};
use crate::scoring::domain::LoanApplication;
use crate::scoring::features::FEATURE_COUNT;
use crate::scoring::inference::InferenceContext;
use crate::scoring::router::scoring_router;
use crate::scoring::service::LoanScoringService;

pub(super) fn applicant() -> LoanApplication {
    LoanApplication {
        age: 28,
        gender: "male".to_string(),
        education: "Bachelor".to_string(),
        annual_income: 550_000.0,
        employment_years: 4,
        home_ownership: "RENT".to_string(),
        loan_amount: 120_000.0,
        loan_intent: "EDUCATION".to_string(),
        credit_score: 720,
        existing_loans: 1,
        prior_defaults: "NO".to_string(),
    }
}

pub(super) fn metadata() -> ModelMetadata {
    ModelMetadata {
        model_version: "test-model-1".to_string(),
        family: ModelFamily::Logistic,
        trained_at: None,
        loaded_at: Utc::now(),
    }
}

#[derive(Debug)]
pub(super) struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn transform(
        &self,
        columns: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; FEATURE_COUNT], InferenceError> {
        Ok(*columns)
    }
}

#[derive(Debug)]
pub(super) struct FailingScaler;

impl FeatureScaler for FailingScaler {
    fn transform(
        &self,
        _columns: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; FEATURE_COUNT], InferenceError> {
        Err(InferenceError::Transform(
            "column 6 produced a non-finite value".to_string(),
        ))
    }
}

/// Classifier double reporting a fixed approval probability, so tests can
/// steer the decision and the probability bands directly.
#[derive(Debug)]
pub(super) struct FixedOutcomeClassifier {
    pub(super) approval: f64,
}

impl LoanClassifier for FixedOutcomeClassifier {
    fn predict(&self, columns: &[f64; FEATURE_COUNT]) -> Result<u8, InferenceError> {
        let proba = self.predict_proba(columns)?;
        Ok(u8::from(proba[1] > proba[0]))
    }

    fn predict_proba(&self, _columns: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], InferenceError> {
        Ok([1.0 - self.approval, self.approval])
    }
}

#[derive(Debug)]
pub(super) struct FailingClassifier;

impl LoanClassifier for FailingClassifier {
    fn predict(&self, _columns: &[f64; FEATURE_COUNT]) -> Result<u8, InferenceError> {
        Err(InferenceError::Predict("forest artifact holds no trees".to_string()))
    }

    fn predict_proba(&self, _columns: &[f64; FEATURE_COUNT]) -> Result<[f64; 2], InferenceError> {
        Err(InferenceError::Predict("forest artifact holds no trees".to_string()))
    }
}

pub(super) fn fixed_context(approval: f64) -> InferenceContext {
    InferenceContext::new(
        Arc::new(IdentityScaler),
        Arc::new(FixedOutcomeClassifier { approval }),
        metadata(),
    )
}

pub(super) fn ready_service(approval: f64) -> LoanScoringService {
    LoanScoringService::new(fixed_context(approval))
}

pub(super) fn failing_scaler_service() -> LoanScoringService {
    LoanScoringService::new(InferenceContext::new(
        Arc::new(FailingScaler),
        Arc::new(FixedOutcomeClassifier { approval: 0.9 }),
        metadata(),
    ))
}

pub(super) fn failing_classifier_service() -> LoanScoringService {
    LoanScoringService::new(InferenceContext::new(
        Arc::new(IdentityScaler),
        Arc::new(FailingClassifier),
        metadata(),
    ))
}

pub(super) fn router_with_probability(approval: f64) -> axum::Router {
    scoring_router(Arc::new(ready_service(approval)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
