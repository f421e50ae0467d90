//! Route safety scoring.
//!
//! A route geometry and travel mode flow through the distance-banded heuristic, the
//! segment decomposer, and finally the response builder. Every public entry point
//! returns a well-formed [`ScoreResult`]; internal failures degrade to
//! [`ScoreResult::fallback`].

pub mod heuristic;
pub mod remote;
pub mod result;
pub mod segments;
pub mod service;

pub use heuristic::{base_score, compute_base_score, jittered, round_to_tenth};
pub use remote::{RemoteScoringClient, RemoteScoringError};
pub use result::{RiskLevel, ScoreColor, ScoreResult};
pub use segments::{segment_count, Segment, SectionDecomposer, SegmentDecomposer};
pub use service::{
    score_route, try_score_route, RouteScoringService, ScoreOptions, ScoringBackend, ScoringError,
};
