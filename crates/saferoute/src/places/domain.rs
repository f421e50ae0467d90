use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

/// Category of an entry in the places store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    School,
    Road,
    Poi,
    Junction,
}

impl PlaceType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "school" => Some(Self::School),
            "road" => Some(Self::Road),
            "poi" => Some(Self::Poi),
            "junction" => Some(Self::Junction),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaceType::School => "school",
            PlaceType::Road => "road",
            PlaceType::Poi => "poi",
            PlaceType::Junction => "junction",
        }
    }

    /// Parses a comma-separated filter, skipping unknown tokens.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        let mut types = Vec::new();
        for place_type in raw.split(',').filter_map(Self::parse) {
            if !types.contains(&place_type) {
                types.push(place_type);
            }
        }
        types
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceId(pub String);

/// GeoJSON point stored on each place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLocation {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Coordinate,
}

impl PointLocation {
    pub fn new(coordinates: Coordinate) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates,
        }
    }
}

/// Document in the places store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    pub subtype: Option<String>,
    pub state: Option<String>,
    pub lga: Option<String>,
    pub location: PointLocation,
}

/// Normalized search request handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub terms: Vec<String>,
    /// Empty means every type.
    pub types: Vec<PlaceType>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlace {
    pub place: Place,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub category: PlaceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

/// Geocoding-feature shaped result so clients can merge providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceFeature {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub place_name: String,
    pub center: Coordinate,
    pub place_type: Vec<PlaceType>,
    pub properties: FeatureProperties,
}

impl PlaceFeature {
    pub fn from_place(place: Place, country: &str) -> Self {
        let place_name = [
            Some(place.name.as_str()),
            place.lga.as_deref(),
            place.state.as_deref(),
            Some(country),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            id: format!("place.{}", place.id.0),
            kind: "Feature".to_string(),
            text: place.name,
            place_name,
            center: place.location.coordinates,
            place_type: vec![place.place_type],
            properties: FeatureProperties {
                category: place.place_type,
                subtype: place.subtype,
            },
        }
    }
}
