use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::HistorySubmission;
use super::repository::HistoryRepository;
use super::service::{HistoryService, HistoryServiceError};
use crate::error::{error_response, repository_error_response};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    #[serde(default)]
    pub user_id: Option<String>,
}

pub fn history_router<R>(service: Arc<HistoryService<R>>) -> Router
where
    R: HistoryRepository + 'static,
{
    Router::new()
        .route("/history", get(list_handler::<R>))
        .route("/history/save", post(save_handler::<R>))
        .route("/history/:id", delete(delete_handler::<R>))
        .with_state(service)
}

fn failure(err: HistoryServiceError) -> Response {
    match err {
        HistoryServiceError::Validation(message) => {
            error_response(StatusCode::BAD_REQUEST, message)
        }
        HistoryServiceError::Repository(err) => repository_error_response(&err),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<HistoryService<R>>>,
    Query(params): Query<HistoryParams>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.list(params.user_id.as_deref()) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<HistoryService<R>>>,
    Json(submission): Json<HistorySubmission>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.save(submission) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<HistoryService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.delete(&id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "deleted": id }))).into_response(),
        Err(err) => failure(err),
    }
}
