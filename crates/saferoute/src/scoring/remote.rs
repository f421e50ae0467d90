use serde::{Deserialize, Serialize};

use super::heuristic::{MAX_SCORE, MIN_SCORE};
use crate::geometry::{Coordinate, RouteGeometry, TravelMode};

#[derive(Debug, thiserror::Error)]
pub enum RemoteScoringError {
    #[error("scoring request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("scoring provider answered with status {0}")]
    Status(u16),
    #[error("scoring provider returned out-of-range score {0}")]
    OutOfRange(f64),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoteScoreRequest<'a> {
    geometry: &'a [Coordinate],
    mode: TravelMode,
    distance_km: f64,
}

#[derive(Deserialize)]
struct RemoteScoreResponse {
    score: f64,
    #[serde(default)]
    segments: Option<Vec<RemoteSegment>>,
}

#[derive(Deserialize)]
struct RemoteSegment {
    score: f64,
}

/// Scores accepted from the provider. Colors and labels are always derived locally.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteScore {
    pub score: f64,
    pub segment_scores: Option<Vec<f64>>,
}

/// HTTP client for the external AI scoring provider.
#[derive(Debug, Clone)]
pub struct RemoteScoringClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RemoteScoringClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn score(
        &self,
        geometry: &RouteGeometry,
        mode: TravelMode,
        distance_km: f64,
    ) -> Result<RemoteScore, RemoteScoringError> {
        let mut request = self.client.post(&self.endpoint).json(&RemoteScoreRequest {
            geometry: geometry.points(),
            mode,
            distance_km,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteScoringError::Status(status.as_u16()));
        }

        let body: RemoteScoreResponse = response.json().await?;
        validate_response(body)
    }
}

fn validate_response(body: RemoteScoreResponse) -> Result<RemoteScore, RemoteScoringError> {
    let score = checked_score(body.score)?;
    let segment_scores = match body.segments {
        Some(segments) if !segments.is_empty() => Some(
            segments
                .into_iter()
                .map(|segment| checked_score(segment.score))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        _ => None,
    };

    Ok(RemoteScore {
        score,
        segment_scores,
    })
}

fn checked_score(score: f64) -> Result<f64, RemoteScoringError> {
    if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(score)
    } else {
        Err(RemoteScoringError::OutOfRange(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<RemoteScore, RemoteScoringError> {
        let body: RemoteScoreResponse = serde_json::from_str(raw).expect("valid json");
        validate_response(body)
    }

    #[test]
    fn accepts_scores_with_and_without_segments() {
        let bare = parse(r#"{ "score": 7.4 }"#).expect("bare score");
        assert_eq!(bare.score, 7.4);
        assert!(bare.segment_scores.is_none());

        let full = parse(r#"{ "score": 6.0, "segments": [{ "score": 5.5 }, { "score": 8.0 }] }"#)
            .expect("segmented score");
        assert_eq!(full.segment_scores, Some(vec![5.5, 8.0]));
    }

    #[test]
    fn rejects_out_of_range_scores() {
        assert!(matches!(
            parse(r#"{ "score": 11.0 }"#),
            Err(RemoteScoringError::OutOfRange(_))
        ));
        assert!(matches!(
            parse(r#"{ "score": 5.0, "segments": [{ "score": 0.2 }] }"#),
            Err(RemoteScoringError::OutOfRange(_))
        ));
    }

    #[test]
    fn request_uses_client_field_names() {
        let geometry = RouteGeometry::new(vec![[3.38, 6.52], [3.39, 6.53]]);
        let body = serde_json::to_value(RemoteScoreRequest {
            geometry: geometry.points(),
            mode: TravelMode::Walking,
            distance_km: 1.5,
        })
        .expect("serializes");
        assert_eq!(body["mode"], "walking");
        assert_eq!(body["distanceKm"], 1.5);
        assert_eq!(body["geometry"][1][0], 3.39);
    }
}
