use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;

use super::domain::ReportSubmission;
use super::repository::ReportRepository;
use super::service::{ReportService, ReportServiceError};
use crate::error::{error_response, repository_error_response};

pub fn reports_router<R>(service: Arc<ReportService<R>>) -> Router
where
    R: ReportRepository + 'static,
{
    Router::new()
        .route(
            "/reports",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route("/reports/:id", delete(delete_handler::<R>))
        .with_state(service)
}

fn failure(err: ReportServiceError) -> Response {
    match err {
        ReportServiceError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        ReportServiceError::Repository(err) => repository_error_response(&err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<ReportService<R>>>) -> Response
where
    R: ReportRepository + 'static,
{
    match service.list() {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Json(submission): Json<ReportSubmission>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.submit(submission) {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.delete(&id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "deleted": id }))).into_response(),
        Err(err) => failure(err),
    }
}
