use serde::{Deserialize, Serialize};

use super::heuristic::{jittered, round_to_tenth, MAX_SCORE, MIN_SCORE};

/// Spread of the noise applied to each section relative to the route score.
pub const SEGMENT_JITTER: f64 = 2.0;

pub const SEGMENT_GREEN: &str = "#00d35a";
pub const SEGMENT_YELLOW: &str = "#eab308";
pub const SEGMENT_RED: &str = "#ef4444";

/// Labeled sub-result of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub title: String,
    pub score: f64,
    pub color: String,
    pub reason: String,
}

impl Segment {
    /// Builds the section at zero-based `index`; color and reason follow from `score`.
    pub fn new(index: usize, score: f64) -> Self {
        let score = round_to_tenth(score.clamp(MIN_SCORE, MAX_SCORE));
        Self {
            title: format!("Section {}", index + 1),
            score,
            color: segment_color(score).to_string(),
            reason: segment_reason(score).to_string(),
        }
    }
}

pub fn segment_color(score: f64) -> &'static str {
    if score >= 7.0 {
        SEGMENT_GREEN
    } else if score >= 4.0 {
        SEGMENT_YELLOW
    } else {
        SEGMENT_RED
    }
}

/// Strictly above 7 reads as safe; exactly 7 still advises caution.
pub fn segment_reason(score: f64) -> &'static str {
    if score > 7.0 {
        "Safe Area"
    } else {
        "Caution Advised"
    }
}

/// `clamp(floor(len / 10), 2, 4)`.
pub fn segment_count(geometry_len: usize) -> usize {
    (geometry_len / 10).clamp(2, 4)
}

/// Splits a scored route into ordered sections.
///
/// Implementations receive the vertex count only. A distance-keyed decomposer can pair
/// this with [`crate::geometry::cumulative_km`] to map sections onto real sub-ranges.
pub trait SegmentDecomposer: Send + Sync {
    fn decompose(
        &self,
        overall_score: f64,
        geometry_len: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Segment>;
}

/// Index-labeled sections, each re-scored around the overall score.
///
/// Sections carry no spatial sub-range; their order still reads as the order along the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionDecomposer;

impl SegmentDecomposer for SectionDecomposer {
    fn decompose(
        &self,
        overall_score: f64,
        geometry_len: usize,
        rng: &mut fastrand::Rng,
    ) -> Vec<Segment> {
        (0..segment_count(geometry_len))
            .map(|index| Segment::new(index, jittered(overall_score, SEGMENT_JITTER, rng)))
            .collect()
    }
}
