use serde::{Deserialize, Serialize};

use super::segments::Segment;

/// Three-tier color band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    Yellow,
    Red,
}

impl ScoreColor {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            Self::Green
        } else if score >= 4.0 {
            Self::Yellow
        } else {
            Self::Red
        }
    }
}

/// Risk band shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            Self::Low
        } else if score >= 4.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

/// Response contract shared by the web and mobile clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: f64,
    pub color: ScoreColor,
    pub risk_level: RiskLevel,
    pub segments: Vec<Segment>,
}

impl ScoreResult {
    /// Builds a result whose color and risk level are derived from `score`.
    pub fn from_score(score: f64, segments: Vec<Segment>) -> Self {
        Self {
            score,
            color: ScoreColor::from_score(score),
            risk_level: RiskLevel::from_score(score),
            segments,
        }
    }

    /// Neutral result returned whenever scoring cannot complete.
    pub fn fallback() -> Self {
        Self::from_score(5.0, Vec::new())
    }
}
