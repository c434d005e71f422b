use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_predictor::config::AppConfig;
use loan_predictor::error::AppError;
use loan_predictor::model::load_context;
use loan_predictor::scoring::LoanScoringService;
use loan_predictor::telemetry;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(model_dir) = args.model_dir.take() {
        config.model.artifact_dir = model_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scoring_service = Arc::new(load_scoring_service(&config.model.artifact_dir));

    let app = with_service_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan approval predictor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Missing or broken artifacts degrade the service instead of aborting
/// startup; health and readiness stay up while predict reports the gap.
fn load_scoring_service(artifact_dir: &Path) -> LoanScoringService {
    match load_context(artifact_dir) {
        Ok(context) => LoanScoringService::new(context),
        Err(err) if err.is_missing() => {
            warn!(error = %err, "model artifacts not found, starting degraded");
            LoanScoringService::degraded()
        }
        Err(err) => {
            error!(error = %err, "model artifacts unusable, starting degraded");
            LoanScoringService::degraded()
        }
    }
}
