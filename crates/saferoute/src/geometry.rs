//! Route polylines, travel modes, and great-circle distance helpers.
//!
//! Coordinates follow GeoJSON ordering: `[longitude, latitude]`.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A single `[lng, lat]` pair.
pub type Coordinate = [f64; 2];

/// How the traveller moves along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Driving,
}

impl TravelMode {
    /// Case-insensitive parse; absent or unrecognised modes resolve to `Driving`.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "walking" || value == "walk" => Self::Walking,
            Some(value) if value == "driving" || value == "drive" => Self::Driving,
            Some(other) => {
                debug!(mode = %other, "unknown travel mode, defaulting to driving");
                Self::Driving
            }
            None => Self::Driving,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
        }
    }

    /// Average speed used for duration estimates.
    pub fn speed_kmh(self) -> f64 {
        match self {
            TravelMode::Walking => 5.0,
            TravelMode::Driving => 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("route geometry has no points")]
    Empty,
    #[error("coordinate {index} is not a [lng, lat] pair")]
    MalformedCoordinate { index: usize },
    #[error("coordinate {index} is out of range or not finite")]
    InvalidCoordinate { index: usize },
    #[error("geojson payload is not a LineString, Feature, or coordinate array")]
    UnsupportedGeoJson,
}

/// Ordered polyline owned by the caller for the duration of a scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteGeometry(pub Vec<Coordinate>);

impl RouteGeometry {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.0.is_empty() {
            return Err(GeometryError::Empty);
        }

        for (index, [lng, lat]) in self.0.iter().enumerate() {
            let finite = lng.is_finite() && lat.is_finite();
            if !finite || !(-180.0..=180.0).contains(lng) || !(-90.0..=90.0).contains(lat) {
                return Err(GeometryError::InvalidCoordinate { index });
            }
        }

        Ok(())
    }

    /// Accepts a bare coordinate array, a `LineString` geometry, or a `Feature` wrapping one.
    pub fn from_geojson(value: &Value) -> Result<Self, GeometryError> {
        match value {
            Value::Array(items) => coordinates_from_array(items).map(Self),
            Value::Object(map) => match map.get("type").and_then(Value::as_str) {
                Some("Feature") => map
                    .get("geometry")
                    .ok_or(GeometryError::UnsupportedGeoJson)
                    .and_then(Self::from_geojson),
                Some("LineString") | None => match map.get("coordinates") {
                    Some(Value::Array(items)) => coordinates_from_array(items).map(Self),
                    _ => Err(GeometryError::UnsupportedGeoJson),
                },
                Some(_) => Err(GeometryError::UnsupportedGeoJson),
            },
            _ => Err(GeometryError::UnsupportedGeoJson),
        }
    }

    /// GeoJSON `LineString` representation for responses.
    pub fn to_line_string(&self) -> LineStringGeoJson {
        LineStringGeoJson {
            kind: "LineString".to_string(),
            coordinates: self.0.clone(),
        }
    }
}

fn coordinates_from_array(items: &[Value]) -> Result<Vec<Coordinate>, GeometryError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let pair = item
                .as_array()
                .filter(|pair| pair.len() >= 2)
                .ok_or(GeometryError::MalformedCoordinate { index })?;
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(lng), Some(lat)) => Ok([lng, lat]),
                _ => Err(GeometryError::MalformedCoordinate { index }),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStringGeoJson {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Coordinate>,
}

/// Great-circle distance between two `[lng, lat]` points in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let from = Point::new(a[0], a[1]);
    let to = Point::new(b[0], b[1]);
    from.haversine_distance(&to) / 1000.0
}

/// Sum of great-circle segment lengths in kilometres.
pub fn length_km(geometry: &RouteGeometry) -> f64 {
    geometry
        .points()
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

/// Running distance from the first vertex, one entry per vertex.
pub fn cumulative_km(geometry: &RouteGeometry) -> Vec<f64> {
    let mut total = 0.0;
    let mut running = Vec::with_capacity(geometry.len());
    for (index, point) in geometry.points().iter().enumerate() {
        if index > 0 {
            total += haversine_km(geometry.points()[index - 1], *point);
        }
        running.push(total);
    }
    running
}
