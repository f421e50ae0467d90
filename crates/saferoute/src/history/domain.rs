use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::{Coordinate, TravelMode};
use crate::scoring::{RiskLevel, ScoreColor};

/// Stored trip as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,
    pub destination: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    pub mode: TravelMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ScoreColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /history/save`; required fields are checked by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySubmission {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub start: Option<Coordinate>,
    #[serde(default)]
    pub destination: Option<Coordinate>,
    #[serde(default)]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}
