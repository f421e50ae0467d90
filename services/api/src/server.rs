use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryHistoryRepository, InMemoryPlaceRepository, InMemoryReportRepository,
    InMemoryUserRepository,
};
use crate::routes::{with_saferoute_routes, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use saferoute::config::AppConfig;
use saferoute::error::AppError;
use saferoute::history::HistoryService;
use saferoute::places::{PlaceRepository, PlacesImporter, PlacesService};
use saferoute::reports::ReportService;
use saferoute::routing::{RouteOptionsService, RoutePlanner};
use saferoute::scoring::{RouteScoringService, ScoringBackend};
use saferoute::telemetry;
use saferoute::users::UserService;
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

    let places = Arc::new(InMemoryPlaceRepository::default());
    if let Some(path) = &config.places.seed_path {
        let summary = PlacesImporter::from_path(path, places.as_ref())?;
        let stored = places.count().unwrap_or_default();
        info!(
            path = %path.display(),
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            stored,
            "places store seeded"
        );
    }

    let scoring = Arc::new(RouteScoringService::from_config(&config.scoring));
    let backend = match scoring.backend() {
        ScoringBackend::LocalHeuristic => "local",
        ScoringBackend::Remote(_) => "remote",
    };

    let services = Services {
        routes: Arc::new(RouteOptionsService::new(
            scoring,
            RoutePlanner::new(config.routing.default_origin),
        )),
        places: Arc::new(PlacesService::new(places, config.places.country.clone())),
        history: Arc::new(HistoryService::new(Arc::new(
            InMemoryHistoryRepository::default(),
        ))),
        reports: Arc::new(ReportService::new(Arc::new(
            InMemoryReportRepository::default(),
        ))),
        users: Arc::new(UserService::new(Arc::new(InMemoryUserRepository::default()))),
    };

    let app = with_saferoute_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, backend, "saferoute api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
