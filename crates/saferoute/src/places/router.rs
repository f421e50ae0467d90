use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::domain::PlaceFeature;
use super::repository::PlaceRepository;
use super::service::PlacesService;

/// Raw query string; malformed values degrade instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PlacesParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub types: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

pub fn places_router<R>(service: Arc<PlacesService<R>>) -> Router
where
    R: PlaceRepository + 'static,
{
    Router::new()
        .route("/places", get(search_handler::<R>))
        .with_state(service)
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<PlacesService<R>>>,
    Query(params): Query<PlacesParams>,
) -> Json<Vec<PlaceFeature>>
where
    R: PlaceRepository + 'static,
{
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok());
    let results = service.search(
        params.q.as_deref().unwrap_or_default(),
        params.types.as_deref(),
        limit,
    );
    Json(results)
}
