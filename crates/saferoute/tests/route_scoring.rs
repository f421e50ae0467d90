//! Behavioral checks for the route scoring pipeline through the public API.

use proptest::prelude::*;
use saferoute::geometry::{RouteGeometry, TravelMode};
use saferoute::scoring::{
    base_score, compute_base_score, score_route, segment_count, RiskLevel, ScoreColor,
    ScoreOptions, ScoreResult, SectionDecomposer, SegmentDecomposer,
};
use serde_json::json;

fn polyline(points: usize) -> RouteGeometry {
    RouteGeometry::new(
        (0..points)
            .map(|i| [3.3792 + i as f64 * 0.0002, 6.5244 + i as f64 * 0.0001])
            .collect(),
    )
}

fn assert_well_formed(result: &ScoreResult) {
    assert!((1.0..=10.0).contains(&result.score), "score {}", result.score);
    assert_eq!(result.color, ScoreColor::from_score(result.score));
    assert_eq!(result.risk_level, RiskLevel::from_score(result.score));
}

#[test]
fn short_walk_scores_green() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let options = ScoreOptions::new(TravelMode::Walking).with_reference_distance(0.5);
    assert_eq!(base_score(TravelMode::Walking, 0.5), 9.0);

    for _ in 0..200 {
        let result = score_route(&polyline(25), &options, &mut rng);
        assert!((8.0..=10.0).contains(&result.score), "score {}", result.score);
        assert_eq!(result.color, ScoreColor::Green);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.segments.len(), 2);
    }
}

#[test]
fn long_drive_scores_around_six() {
    let mut rng = fastrand::Rng::with_seed(77);
    let options = ScoreOptions::new(TravelMode::Driving).with_reference_distance(6.0);
    assert_eq!(base_score(TravelMode::Driving, 6.0), 6.0);

    for points in [5, 30, 45] {
        let result = score_route(&polyline(points), &options, &mut rng);
        assert!((5.0..=7.0).contains(&result.score), "score {}", result.score);
        assert_eq!(result.segments.len(), segment_count(points));
        assert_well_formed(&result);
    }
}

#[test]
fn ten_thousand_jittered_scores_keep_their_bands() {
    let mut rng = fastrand::Rng::with_seed(10_000);
    for i in 0..10_000 {
        let mode = if i % 2 == 0 {
            TravelMode::Walking
        } else {
            TravelMode::Driving
        };
        let distance = (i % 80) as f64 * 0.1;
        let score = compute_base_score(mode, distance, &mut rng);
        let result = ScoreResult::from_score(score, Vec::new());
        assert_well_formed(&result);
    }
}

#[test]
fn segment_counts_for_reference_lengths() {
    let mut rng = fastrand::Rng::with_seed(9);
    for (len, expected) in [(0, 2), (5, 2), (10, 2), (25, 2), (45, 4), (100, 4)] {
        let segments = SectionDecomposer.decompose(6.5, len, &mut rng);
        assert_eq!(segments.len(), expected, "geometry length {len}");
    }
}

#[test]
fn unusable_inputs_return_neutral_result() {
    let mut rng = fastrand::Rng::with_seed(1);
    let cases = [
        RouteGeometry::new(Vec::new()),
        RouteGeometry::new(vec![[f64::INFINITY, 6.5], [3.4, 6.5]]),
        RouteGeometry::new(vec![[3.4, -91.0]]),
    ];
    for geometry in &cases {
        let result = score_route(geometry, &ScoreOptions::new(TravelMode::Walking), &mut rng);
        assert_eq!(result, ScoreResult::fallback());
    }

    let unparsable = RouteGeometry::from_geojson(&json!({ "coordinates": "nope" }));
    assert!(unparsable.is_err());

    let null_mode = ScoreOptions::new(TravelMode::parse_or_default(None));
    let result = score_route(&polyline(12), &null_mode, &mut rng);
    assert_well_formed(&result);
}

proptest! {
    #[test]
    fn base_score_is_non_increasing(a in 0.0f64..50.0, b in 0.0f64..50.0) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        for mode in [TravelMode::Walking, TravelMode::Driving] {
            prop_assert!(base_score(mode, near) >= base_score(mode, far));
        }
    }

    #[test]
    fn scored_routes_are_always_well_formed(
        seed in any::<u64>(),
        points in 1usize..120,
        distance in proptest::option::of(0.0f64..25.0),
        walking in any::<bool>(),
    ) {
        let mode = if walking { TravelMode::Walking } else { TravelMode::Driving };
        let mut options = ScoreOptions::new(mode);
        if let Some(distance) = distance {
            options = options.with_reference_distance(distance);
        }
        let mut rng = fastrand::Rng::with_seed(seed);
        let result = score_route(&polyline(points), &options, &mut rng);

        prop_assert!((1.0..=10.0).contains(&result.score));
        prop_assert_eq!(result.color, ScoreColor::from_score(result.score));
        prop_assert_eq!(result.risk_level, RiskLevel::from_score(result.score));
        prop_assert_eq!(result.segments.len(), segment_count(points));
        for segment in &result.segments {
            prop_assert!((1.0..=10.0).contains(&segment.score));
        }
    }
}
