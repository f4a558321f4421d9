use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use deck_ai::config::AppConfig;
use deck_ai::error::AppError;
use deck_ai::telemetry;
use deck_ai::workflows::slides::{EntropySelection, SlideMatchingService};
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{seeded_repository, AppState};
use crate::routes::with_slide_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = seeded_repository();
    // Weight validation happens here; a skewed table refuses to serve.
    let matching_service = Arc::new(SlideMatchingService::new(
        repository,
        config.matching.clone(),
        Arc::new(EntropySelection),
    )?);

    let app = with_slide_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "template matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
