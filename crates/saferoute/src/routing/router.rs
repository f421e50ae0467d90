use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::options::{RouteOptionsRequest, RouteOptionsService, RouteScoreRequest};
use crate::error::error_response;
use crate::scoring::ScoreResult;

pub fn route_router(service: Arc<RouteOptionsService>) -> Router {
    Router::new()
        .route("/route/options", post(options_handler))
        .route("/route/score", post(score_handler))
        .with_state(service)
}

pub(crate) async fn options_handler(
    State(service): State<Arc<RouteOptionsService>>,
    payload: Result<Json<RouteOptionsRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match service.options(request).await {
        Ok(routes) => (StatusCode::OK, Json(json!({ "routes": routes }))).into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
    }
}

pub(crate) async fn score_handler(
    State(service): State<Arc<RouteOptionsService>>,
    payload: Result<Json<RouteScoreRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable score request, returning neutral score");
            return (StatusCode::OK, Json(ScoreResult::fallback())).into_response();
        }
    };

    match service.score(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
    }
}
