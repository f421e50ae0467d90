use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::planner::RoutePlanner;
use crate::geometry::{length_km, Coordinate, LineStringGeoJson, RouteGeometry, TravelMode};
use crate::scoring::{RouteScoringService, ScoreOptions, ScoreResult};

/// Body of `POST /route/options`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteOptionsRequest {
    #[serde(default)]
    pub start: Option<Coordinate>,
    #[serde(default)]
    pub destination: Option<Coordinate>,
    /// Read leniently; anything other than a known mode string means driving.
    #[serde(default)]
    pub mode: Option<Value>,
}

/// Body of `POST /route/score`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteScoreRequest {
    #[serde(default)]
    pub geojson: Option<Value>,
    #[serde(default)]
    pub mode: Option<Value>,
    /// Kilometres; overrides the length measured from `geojson`. Non-numeric values are ignored.
    #[serde(default)]
    pub distance: Option<Value>,
}

/// One candidate route with its safety assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub id: String,
    pub label: String,
    /// Kilometres.
    pub distance: f64,
    /// Minutes.
    pub duration: f64,
    pub eta: String,
    pub geojson: LineStringGeoJson,
    #[serde(flatten)]
    pub safety: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteRequestError {
    #[error("destination is required")]
    MissingDestination,
    #[error("geojson is required")]
    MissingGeometry,
    #[error("{0} coordinate is out of range")]
    InvalidCoordinate(&'static str),
}

/// Builds and scores route alternatives.
pub struct RouteOptionsService {
    scoring: Arc<RouteScoringService>,
    planner: RoutePlanner,
}

impl RouteOptionsService {
    pub fn new(scoring: Arc<RouteScoringService>, planner: RoutePlanner) -> Self {
        Self { scoring, planner }
    }

    pub fn scoring(&self) -> &RouteScoringService {
        &self.scoring
    }

    /// Alternatives ordered from highest to lowest safety score.
    pub async fn options(
        &self,
        request: RouteOptionsRequest,
    ) -> Result<Vec<RouteOption>, RouteRequestError> {
        let destination = request
            .destination
            .ok_or(RouteRequestError::MissingDestination)?;
        check_coordinate(destination, "destination")?;
        if let Some(start) = request.start {
            check_coordinate(start, "start")?;
        }

        let mode = lenient_mode(request.mode.as_ref());
        let mut options = Vec::new();
        for candidate in self.planner.candidates(request.start, destination) {
            let distance_km = length_km(&candidate.geometry);
            let safety = self
                .scoring
                .score(&candidate.geometry, &ScoreOptions::new(mode))
                .await;
            let minutes = travel_minutes(distance_km, mode);

            options.push(RouteOption {
                id: candidate.id.to_string(),
                label: candidate.label.to_string(),
                distance: round_to(distance_km, 2),
                duration: round_to(minutes, 1),
                eta: format_eta(minutes),
                geojson: candidate.geometry.to_line_string(),
                safety,
            });
        }

        options.sort_by(|a, b| b.safety.score.total_cmp(&a.safety.score));
        Ok(options)
    }

    /// Scores a client-supplied geometry. Malformed geometry yields the neutral result.
    pub async fn score(&self, request: RouteScoreRequest) -> Result<ScoreResult, RouteRequestError> {
        let raw = request.geojson.ok_or(RouteRequestError::MissingGeometry)?;
        let mut options = ScoreOptions::new(lenient_mode(request.mode.as_ref()));
        match request.distance.as_ref() {
            Some(Value::Null) | None => {}
            Some(value) => match value.as_f64() {
                Some(distance) => options = options.with_reference_distance(distance),
                None => debug!(distance = %value, "ignoring non-numeric reference distance"),
            },
        }

        match RouteGeometry::from_geojson(&raw) {
            Ok(geometry) => Ok(self.scoring.score(&geometry, &options).await),
            Err(err) => {
                warn!(error = %err, "unreadable route geometry, returning neutral score");
                Ok(ScoreResult::fallback())
            }
        }
    }
}

fn lenient_mode(raw: Option<&Value>) -> TravelMode {
    TravelMode::parse_or_default(raw.and_then(Value::as_str))
}

fn check_coordinate(coordinate: Coordinate, which: &'static str) -> Result<(), RouteRequestError> {
    RouteGeometry::new(vec![coordinate])
        .validate()
        .map_err(|_| RouteRequestError::InvalidCoordinate(which))
}

fn travel_minutes(distance_km: f64, mode: TravelMode) -> f64 {
    distance_km / mode.speed_kmh() * 60.0
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `"12 min"` or `"1 h 05 min"`; anything under a minute reads as one minute.
pub fn format_eta(minutes: f64) -> String {
    let total = (minutes.round() as u64).max(1);
    if total < 60 {
        format!("{total} min")
    } else {
        format!("{} h {:02} min", total / 60, total % 60)
    }
}
