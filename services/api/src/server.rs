use crate::cli::ServeArgs;
use crate::infra::{
    apply_seed, sample_batch, AppState, CatalogState, InMemoryListingCatalog,
    InMemoryProfileDirectory,
};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use stayconnect::config::AppConfig;
use stayconnect::error::AppError;
use stayconnect::matching::MatchingEngine;
use stayconnect::seed::SeedImporter;
use stayconnect::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed_csv) = args.seed_csv.take() {
        config.seed = Some(seed_csv);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let batch = match &config.seed {
        Some(path) => SeedImporter::from_path(path)?,
        None => sample_batch(),
    };
    info!(
        users = batch.users.len(),
        listings = batch.listings.len(),
        "seeding catalog"
    );

    let directory = Arc::new(InMemoryProfileDirectory::default());
    let catalog = Arc::new(InMemoryListingCatalog::default());
    apply_seed(batch, &directory, &catalog);

    let catalog_state = CatalogState {
        directory: directory.clone(),
        catalog: catalog.clone(),
    };
    let engine = Arc::new(MatchingEngine::new(directory, catalog));

    let app = with_matching_routes(engine)
        .layer(Extension(app_state))
        .layer(Extension(catalog_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "host matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
