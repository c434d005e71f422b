mod common {
    use std::sync::Arc;

    use chrono::Utc;

    use loan_predictor::model::{
        LogisticClassifier, ModelFamily, ModelMetadata, StandardScaler,
    };
    use loan_predictor::scoring::{
        scoring_router, InferenceContext, LoanApplication, LoanScoringService, FEATURE_COUNT,
    };

    pub(super) fn strong_applicant() -> LoanApplication {
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

    pub(super) fn weak_applicant() -> LoanApplication {
        LoanApplication {
            age: 42,
            gender: "female".to_string(),
            education: "High School".to_string(),
            annual_income: 24_000.0,
            employment_years: 1,
            home_ownership: "RENT".to_string(),
            loan_amount: 100_000.0,
            loan_intent: "PERSONAL".to_string(),
            credit_score: 500,
            existing_loans: 4,
            prior_defaults: "YES".to_string(),
        }
    }

    pub(super) fn metadata() -> ModelMetadata {
        ModelMetadata {
            model_version: "2024-11-05".to_string(),
            family: ModelFamily::Logistic,
            trained_at: None,
            loaded_at: Utc::now(),
        }
    }

    /// Logistic model reading only the standardized credit score: 720 maps to
    /// a strong approval, 500 to a near-certain rejection.
    pub(super) fn logistic_context() -> InferenceContext {
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];
        mean[8] = 700.0;
        scale[8] = 50.0;

        let mut weights = [0.0; FEATURE_COUNT];
        weights[8] = 2.0;

        InferenceContext::new(
            Arc::new(StandardScaler::new(mean, scale)),
            Arc::new(LogisticClassifier::new(weights, 1.0)),
            metadata(),
        )
    }

    pub(super) fn scoring_service() -> LoanScoringService {
        LoanScoringService::new(logistic_context())
    }

    pub(super) fn build_router() -> axum::Router {
        scoring_router(Arc::new(scoring_service()))
    }
}

mod scoring {
    use super::common::*;
    use loan_predictor::scoring::{LoanDecision, RiskLevel};

    #[test]
    fn strong_applicant_is_approved_with_favorable_terms() {
        let service = scoring_service();

        let assessment = service
            .evaluate(&strong_applicant())
            .expect("scoring succeeds");

        assert_eq!(assessment.prediction, LoanDecision::Approved);
        assert!(assessment.probability > 0.8);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(
            assessment.recommendation,
            "Applicant is eligible for the requested loan amount with favorable terms."
        );
    }

    #[test]
    fn weak_applicant_is_rejected_as_high_risk() {
        let service = scoring_service();

        let assessment = service
            .evaluate(&weak_applicant())
            .expect("scoring succeeds");

        assert_eq!(assessment.prediction, LoanDecision::Rejected);
        assert!(assessment.probability < 0.1);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(
            assessment.recommendation,
            "Applicant does not meet current lending criteria. Please reapply when financial situation improves."
        );
    }

    #[test]
    fn loaded_metadata_is_visible_through_the_service() {
        let service = scoring_service();

        let metadata = service.metadata().expect("context loaded");
        assert_eq!(metadata.model_version, "2024-11-05");
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use loan_predictor::scoring::{scoring_router, LoanScoringService};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn predict_endpoint_scores_submitted_applications() {
        let router = build_router();

        let response = router
            .oneshot(
                Request::post("/api/v1/loans/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&strong_applicant()).expect("serialize applicant"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(
            payload.get("prediction").and_then(Value::as_str),
            Some("Approved")
        );
        assert_eq!(
            payload.get("risk_level").and_then(Value::as_str),
            Some("Low")
        );
        assert!(payload
            .get("probability")
            .and_then(Value::as_f64)
            .unwrap_or_default()
            > 0.8);
        assert!(payload.get("recommendation").is_some());
    }

    #[tokio::test]
    async fn predict_endpoint_rejects_out_of_range_numerics() {
        let router = build_router();
        let mut applicant = strong_applicant();
        applicant.credit_score = 851;

        let response = router
            .oneshot(
                Request::post("/api/v1/loans/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&applicant).expect("serialize applicant"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("credit score 851"));
    }

    #[tokio::test]
    async fn predict_endpoint_fails_closed_without_models() {
        let router = scoring_router(Arc::new(LoanScoringService::degraded()));

        let response = router
            .oneshot(
                Request::post("/api/v1/loans/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&strong_applicant()).expect("serialize applicant"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = json_body(response).await;
        assert_eq!(
            payload.get("error").and_then(Value::as_str),
            Some("models not loaded")
        );
    }
}

mod artifacts {
    use super::common::*;
    use loan_predictor::model::{load_context, ModelFamily, CLASSIFIER_FILE, SCALER_FILE};
    use loan_predictor::scoring::{LoanDecision, LoanScoringService, FEATURE_COUNT};
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    fn write_artifacts(dir_name: &str, classifier: serde_json::Value) -> PathBuf {
        let dir = std::env::temp_dir().join(dir_name);
        fs::create_dir_all(&dir).expect("temp dir");

        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![1.0; FEATURE_COUNT];
        mean[8] = 700.0;
        scale[8] = 50.0;

        let scaler = json!({
            "mean": mean,
            "scale": scale,
            "feature_names": [
                "gender",
                "age",
                "marital_status",
                "education",
                "employment_type",
                "employment_years",
                "annual_income",
                "home_ownership",
                "credit_score",
                "prior_defaults",
                "loan_amount",
                "loan_intent",
            ],
        });

        fs::write(
            dir.join(SCALER_FILE),
            serde_json::to_vec(&scaler).expect("scaler json"),
        )
        .expect("write scaler");
        fs::write(
            dir.join(CLASSIFIER_FILE),
            serde_json::to_vec(&classifier).expect("classifier json"),
        )
        .expect("write classifier");

        dir
    }

    #[test]
    fn logistic_artifacts_load_and_score() {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[8] = 2.0;

        let dir = write_artifacts(
            "loan-predictor-logistic-workflow",
            json!({
                "model_version": "2024-11-05",
                "trained_at": "2024-11-05T08:30:00Z",
                "family": "logistic",
                "weights": weights,
                "intercept": 1.0,
            }),
        );

        let context = load_context(&dir).expect("artifacts load");
        assert_eq!(context.metadata().family, ModelFamily::Logistic);
        assert_eq!(context.metadata().model_version, "2024-11-05");

        let service = LoanScoringService::new(context);
        let assessment = service
            .evaluate(&strong_applicant())
            .expect("scoring succeeds");
        assert_eq!(assessment.prediction, LoanDecision::Approved);
        assert!(assessment.probability > 0.8);
    }

    #[test]
    fn forest_artifacts_average_tree_votes() {
        let dir = write_artifacts(
            "loan-predictor-forest-workflow",
            json!({
                "model_version": "2024-12-01",
                "family": "random_forest",
                "trees": [
                    {
                        "nodes": [
                            { "kind": "split", "feature": 8, "threshold": 0.0, "left": 1, "right": 2 },
                            { "kind": "leaf", "value": [8.0, 2.0] },
                            { "kind": "leaf", "value": [1.0, 9.0] },
                        ],
                    },
                    {
                        "nodes": [
                            { "kind": "split", "feature": 8, "threshold": 0.0, "left": 1, "right": 2 },
                            { "kind": "leaf", "value": [6.0, 4.0] },
                            { "kind": "leaf", "value": [2.0, 8.0] },
                        ],
                    },
                ],
            }),
        );

        let context = load_context(&dir).expect("artifacts load");
        assert_eq!(context.metadata().family, ModelFamily::RandomForest);

        let service = LoanScoringService::new(context);

        // Credit 720 standardizes to 0.4, taking the right branch of both
        // trees: averaged approval is (0.9 + 0.8) / 2.
        let approved = service
            .evaluate(&strong_applicant())
            .expect("scoring succeeds");
        assert_eq!(approved.prediction, LoanDecision::Approved);
        assert_eq!(approved.probability, 0.85);

        // Credit 500 standardizes to -4.0, taking the left branch of both
        // trees: averaged approval is (0.2 + 0.4) / 2.
        let rejected = service
            .evaluate(&weak_applicant())
            .expect("scoring succeeds");
        assert_eq!(rejected.prediction, LoanDecision::Rejected);
        assert_eq!(rejected.probability, 0.3);
    }
}
