use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::heuristic::{compute_base_score, round_to_tenth};
use super::remote::{RemoteScoringClient, RemoteScoringError};
use super::result::ScoreResult;
use super::segments::{segment_count, SectionDecomposer, Segment, SegmentDecomposer};
use crate::config::{ScoringBackendKind, ScoringConfig};
use crate::geometry::{length_km, GeometryError, RouteGeometry, TravelMode};

/// Inputs besides the geometry itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOptions {
    pub mode: TravelMode,
    /// Distance in kilometres; computed from the geometry when absent.
    pub reference_distance_km: Option<f64>,
}

impl ScoreOptions {
    pub fn new(mode: TravelMode) -> Self {
        Self {
            mode,
            reference_distance_km: None,
        }
    }

    pub fn with_reference_distance(mut self, distance_km: f64) -> Self {
        self.reference_distance_km = Some(distance_km);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("reference distance {0} is not a non-negative number")]
    InvalidDistance(f64),
    #[error(transparent)]
    Remote(#[from] RemoteScoringError),
    #[error("scoring provider did not answer within {0:?}")]
    Timeout(Duration),
}

fn resolve_distance(geometry: &RouteGeometry, options: &ScoreOptions) -> Result<f64, ScoringError> {
    match options.reference_distance_km {
        Some(distance) if distance.is_finite() && distance >= 0.0 => Ok(distance),
        Some(distance) => Err(ScoringError::InvalidDistance(distance)),
        None => Ok(length_km(geometry)),
    }
}

/// Local heuristic scoring that reports why it could not produce a result.
pub fn try_score_route(
    geometry: &RouteGeometry,
    options: &ScoreOptions,
    decomposer: &dyn SegmentDecomposer,
    rng: &mut fastrand::Rng,
) -> Result<ScoreResult, ScoringError> {
    geometry.validate()?;
    let distance_km = resolve_distance(geometry, options)?;
    let score = compute_base_score(options.mode, distance_km, rng);
    let segments = decomposer.decompose(score, geometry.len(), rng);
    debug!(
        mode = options.mode.label(),
        distance_km,
        score,
        segments = segments.len(),
        "scored route locally"
    );
    Ok(ScoreResult::from_score(score, segments))
}

/// Scores a route with the local heuristic, degrading to [`ScoreResult::fallback`] on failure.
pub fn score_route(
    geometry: &RouteGeometry,
    options: &ScoreOptions,
    rng: &mut fastrand::Rng,
) -> ScoreResult {
    try_score_route(geometry, options, &SectionDecomposer, rng).unwrap_or_else(|err| {
        warn!(error = %err, "route scoring degraded to neutral result");
        ScoreResult::fallback()
    })
}

/// Where scores come from.
#[derive(Debug, Clone)]
pub enum ScoringBackend {
    LocalHeuristic,
    /// External provider; any failure or timeout falls back to the local heuristic.
    Remote(RemoteScoringClient),
}

/// Scoring entry point used by the HTTP layer.
pub struct RouteScoringService {
    backend: ScoringBackend,
    timeout: Duration,
    seed: Option<u64>,
    decomposer: Arc<dyn SegmentDecomposer>,
}

impl RouteScoringService {
    pub fn new(backend: ScoringBackend, timeout: Duration, seed: Option<u64>) -> Self {
        Self {
            backend,
            timeout,
            seed,
            decomposer: Arc::new(SectionDecomposer),
        }
    }

    pub fn local(seed: Option<u64>) -> Self {
        Self::new(
            ScoringBackend::LocalHeuristic,
            ScoringConfig::default().timeout,
            seed,
        )
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        let backend = match &config.backend {
            ScoringBackendKind::Local => ScoringBackend::LocalHeuristic,
            ScoringBackendKind::Remote { url, api_key } => {
                ScoringBackend::Remote(RemoteScoringClient::new(url.clone(), api_key.clone()))
            }
        };
        Self::new(backend, config.timeout, config.seed)
    }

    pub fn with_decomposer(mut self, decomposer: Arc<dyn SegmentDecomposer>) -> Self {
        self.decomposer = decomposer;
        self
    }

    pub fn backend(&self) -> &ScoringBackend {
        &self.backend
    }

    /// Fresh per-call generator; seeded calls replay the same jitter.
    fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }

    pub fn score_local(&self, geometry: &RouteGeometry, options: &ScoreOptions) -> ScoreResult {
        let mut rng = self.rng();
        try_score_route(geometry, options, self.decomposer.as_ref(), &mut rng).unwrap_or_else(
            |err| {
                warn!(error = %err, "route scoring degraded to neutral result");
                ScoreResult::fallback()
            },
        )
    }

    pub async fn score(&self, geometry: &RouteGeometry, options: &ScoreOptions) -> ScoreResult {
        match &self.backend {
            ScoringBackend::LocalHeuristic => self.score_local(geometry, options),
            ScoringBackend::Remote(client) => {
                match self.score_remote(client, geometry, options).await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(
                            error = %err,
                            endpoint = client.endpoint(),
                            "remote scoring unavailable, using local heuristic"
                        );
                        self.score_local(geometry, options)
                    }
                }
            }
        }
    }

    async fn score_remote(
        &self,
        client: &RemoteScoringClient,
        geometry: &RouteGeometry,
        options: &ScoreOptions,
    ) -> Result<ScoreResult, ScoringError> {
        geometry.validate()?;
        let distance_km = resolve_distance(geometry, options)?;

        let remote = tokio::time::timeout(
            self.timeout,
            client.score(geometry, options.mode, distance_km),
        )
        .await
        .map_err(|_| ScoringError::Timeout(self.timeout))??;

        let score = round_to_tenth(remote.score);
        let expected = segment_count(geometry.len());
        let segments = match remote.segment_scores {
            Some(scores) if scores.len() == expected => scores
                .into_iter()
                .enumerate()
                .map(|(index, segment_score)| Segment::new(index, segment_score))
                .collect(),
            _ => {
                let mut rng = self.rng();
                self.decomposer.decompose(score, geometry.len(), &mut rng)
            }
        };

        Ok(ScoreResult::from_score(score, segments))
    }
}
