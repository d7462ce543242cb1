use crate::cli::ServeArgs;
use crate::infra::{load_catalog, matching_engine, AppState};
use crate::routes::with_recommendation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use smartintern::config::AppConfig;
use smartintern::error::AppError;
use smartintern::matching::RecommendationService;
use smartintern::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let catalog = load_catalog(&config.matching)?;
    let summary = catalog.summary();
    let service = Arc::new(RecommendationService::new(
        Arc::new(catalog),
        matching_engine(&config.matching),
        config.matching.ranking,
    ));

    let app = with_recommendation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        active_postings = summary.active,
        closed_postings = summary.closed,
        "internship matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
