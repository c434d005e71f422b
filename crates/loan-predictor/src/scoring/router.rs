use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::LoanApplication;
use super::service::{LoanScoringService, PredictionError};

/// Router builder exposing the prediction endpoint.
pub fn scoring_router(service: Arc<LoanScoringService>) -> Router {
    Router::new()
        .route("/api/v1/loans/predict", post(predict_handler))
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<LoanScoringService>>,
    axum::Json(application): axum::Json<LoanApplication>,
) -> Response {
    match service.evaluate(&application) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(PredictionError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
