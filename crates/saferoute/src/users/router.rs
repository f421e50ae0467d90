use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::domain::LoginRequest;
use super::repository::UserRepository;
use super::service::{UserService, UserServiceError};
use crate::error::{error_response, repository_error_response};

pub fn users_router<R>(service: Arc<UserService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/auth/login", post(login_handler::<R>))
        .with_state(service)
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.login(request) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(UserServiceError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, message)
        }
        Err(UserServiceError::Repository(err)) => repository_error_response(&err),
    }
}
