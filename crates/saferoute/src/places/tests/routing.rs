use super::common::*;
use crate::places::router::places_router;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let router = places_router(Arc::new(lagos_service()));
    let response = router
        .oneshot(
            Request::get(uri)
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

#[tokio::test]
async fn places_route_returns_features() {
    let (status, body) = get("/places?q=lekki&types=road&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().expect("array body");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["text"], "Lekki Expressway");
    assert_eq!(results[0]["center"][0], 3.4697);
}

#[tokio::test]
async fn places_route_degrades_on_bad_params() {
    let (status, body) = get("/places?limit=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    let (status, body) = get("/places?q=lekki&limit=not-a-number").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}
