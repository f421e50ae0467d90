use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use saferoute::history::{history_router, HistoryRepository, HistoryService};
use saferoute::places::{places_router, PlaceRepository, PlacesService};
use saferoute::reports::{reports_router, ReportRepository, ReportService};
use saferoute::routing::{route_router, RouteOptionsService};
use saferoute::users::{users_router, UserRepository, UserService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Every feature service the HTTP surface exposes.
pub(crate) struct Services<P, H, R, U> {
    pub(crate) routes: Arc<RouteOptionsService>,
    pub(crate) places: Arc<PlacesService<P>>,
    pub(crate) history: Arc<HistoryService<H>>,
    pub(crate) reports: Arc<ReportService<R>>,
    pub(crate) users: Arc<UserService<U>>,
}

pub(crate) fn with_saferoute_routes<P, H, R, U>(services: Services<P, H, R, U>) -> Router
where
    P: PlaceRepository + 'static,
    H: HistoryRepository + 'static,
    R: ReportRepository + 'static,
    U: UserRepository + 'static,
{
    route_router(services.routes)
        .merge(places_router(services.places))
        .merge(history_router(services.history))
        .merge(reports_router(services.reports))
        .merge(users_router(services.users))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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
