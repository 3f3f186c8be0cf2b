use crate::cli::ServeArgs;
use crate::infra::{AppState, ListingCatalog};
use crate::routes::with_housing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use inclusive_housing::config::AppConfig;
use inclusive_housing::error::AppError;
use inclusive_housing::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(listings_csv) = args.listings_csv.take() {
        config.data.listings_csv = Some(listings_csv);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(ListingCatalog::load(&config.data)?);
    let listings = catalog.listings.len();

    let app = with_housing_routes(catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, listings, "inclusive housing scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
