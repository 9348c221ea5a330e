use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySnapshotStore};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rent_scoring::config::AppConfig;
use rent_scoring::error::AppError;
use rent_scoring::scoring::shared_engine_from;
use rent_scoring::snapshot::{PropertyScoringService, SnapshotCsvImporter};
use rent_scoring::telemetry;
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

    // Instantiate up front so the first request does not pay for it.
    let engine = shared_engine_from(config.scoring.config_path.clone()).await?;

    let store = match &config.scoring.snapshot_csv {
        Some(path) => InMemorySnapshotStore::from_snapshots(SnapshotCsvImporter::from_path(path)?),
        None => InMemorySnapshotStore::default(),
    };
    info!(properties = store.len(), "snapshot store loaded");

    let scoring_service = Arc::new(PropertyScoringService::new(Arc::new(store), engine));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rent scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
