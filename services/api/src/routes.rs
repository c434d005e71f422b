use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use loan_predictor::scoring::{scoring_router, LoanScoringService};
use serde_json::json;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");
const STYLE_CSS: &str = include_str!("../static/style.css");

pub(crate) fn with_service_routes(service: Arc<LoanScoringService>) -> axum::Router {
    scoring_router(service)
        .route("/", axum::routing::get(index_endpoint))
        .route("/static/:asset", axum::routing::get(asset_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn index_endpoint() -> Response {
    asset_response("index.html", INDEX_HTML)
}

pub(crate) async fn asset_endpoint(
    axum::extract::Path(asset): axum::extract::Path<String>,
) -> Response {
    let body = match asset.as_str() {
        "app.js" => APP_JS,
        "style.css" => STYLE_CSS,
        _ => {
            let payload = json!({ "error": "unknown asset" });
            return (StatusCode::NOT_FOUND, Json(payload)).into_response();
        }
    };

    asset_response(&asset, body)
}

fn asset_response(name: &str, body: &'static str) -> Response {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.to_string())],
        body,
    )
        .into_response()
}
