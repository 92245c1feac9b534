use crate::cli::ServeArgs;
use crate::infra::{build_committee_service, AppState, ImportedDirectory, InMemoryCommitteeStore};
use crate::routes::with_committee_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use committee_ai::config::AppConfig;
use committee_ai::error::AppError;
use committee_ai::telemetry;
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

    // The mounted engine routes serve whatever the store holds; the one-shot
    // CSV report endpoint builds its own directory per request.
    let directory = Arc::new(ImportedDirectory::default());
    let store = Arc::new(InMemoryCommitteeStore::default());
    let committee_service = Arc::new(build_committee_service(
        directory,
        store,
        config.engine.staleness_days,
    ));

    let app = with_committee_routes(committee_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "committee engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
