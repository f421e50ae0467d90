use crate::geometry::{haversine_km, Coordinate, RouteGeometry};

/// Vertices per kilometre of straight-line distance.
const POINTS_PER_KM: f64 = 5.0;
const MIN_POINTS: usize = 2;
const MAX_POINTS: usize = 60;

/// Lateral bow of the alternative routes as a fraction of the straight-line distance.
const ARC_OFFSET: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoute {
    pub id: &'static str,
    pub label: &'static str,
    pub geometry: RouteGeometry,
}

/// Synthesizes alternative polylines between two points until a directions provider is wired in.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    default_origin: Coordinate,
}

impl RoutePlanner {
    pub fn new(default_origin: Coordinate) -> Self {
        Self { default_origin }
    }

    pub fn default_origin(&self) -> Coordinate {
        self.default_origin
    }

    /// Direct line plus two arcs bowing to either side.
    pub fn candidates(&self, start: Option<Coordinate>, destination: Coordinate) -> Vec<CandidateRoute> {
        let start = start.unwrap_or(self.default_origin);
        let points = point_count(haversine_km(start, destination));

        [
            ("direct", "Direct", 0.0),
            ("main-roads", "Main roads", ARC_OFFSET),
            ("side-streets", "Side streets", -ARC_OFFSET),
        ]
        .into_iter()
        .map(|(id, label, offset)| CandidateRoute {
            id,
            label,
            geometry: RouteGeometry::new(arc(start, destination, offset, points)),
        })
        .collect()
    }
}

fn point_count(straight_km: f64) -> usize {
    let wanted = (straight_km * POINTS_PER_KM).ceil() as usize + 1;
    wanted.clamp(MIN_POINTS, MAX_POINTS)
}

/// Quadratic Bézier from `start` to `end` whose control point sits `offset` of the chord
/// length off the midpoint, perpendicular to the chord. Planar in degree space.
fn arc(start: Coordinate, end: Coordinate, offset: f64, points: usize) -> Vec<Coordinate> {
    let (dx, dy) = (end[0] - start[0], end[1] - start[1]);
    let control = [
        (start[0] + end[0]) / 2.0 - dy * offset,
        (start[1] + end[1]) / 2.0 + dx * offset,
    ];

    (0..points)
        .map(|step| {
            let t = step as f64 / (points - 1) as f64;
            let u = 1.0 - t;
            let lng = u * u * start[0] + 2.0 * u * t * control[0] + t * t * end[0];
            let lat = u * u * start[1] + 2.0 * u * t * control[1] + t * t * end[1];
            [lng.clamp(-180.0, 180.0), lat.clamp(-90.0, 90.0)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::length_km;

    const IKEJA: Coordinate = [3.3515, 6.6018];
    const LEKKI: Coordinate = [3.4697, 6.4478];

    #[test]
    fn candidates_share_endpoints() {
        let planner = RoutePlanner::new([3.3792, 6.5244]);
        let candidates = planner.candidates(Some(IKEJA), LEKKI);
        assert_eq!(candidates.len(), 3);

        for candidate in &candidates {
            let points = candidate.geometry.points();
            assert_eq!(points.first(), Some(&IKEJA));
            let last = points.last().expect("non-empty");
            assert!((last[0] - LEKKI[0]).abs() < 1e-9 && (last[1] - LEKKI[1]).abs() < 1e-9);
            assert!(candidate.geometry.validate().is_ok());
        }
    }

    #[test]
    fn arcs_are_longer_than_direct_line() {
        let planner = RoutePlanner::new([3.3792, 6.5244]);
        let candidates = planner.candidates(Some(IKEJA), LEKKI);
        let direct = length_km(&candidates[0].geometry);
        assert!(length_km(&candidates[1].geometry) > direct);
        assert!(length_km(&candidates[2].geometry) > direct);
    }

    #[test]
    fn missing_start_uses_default_origin() {
        let origin = [3.3792, 6.5244];
        let planner = RoutePlanner::new(origin);
        let candidates = planner.candidates(None, LEKKI);
        assert_eq!(candidates[0].geometry.points()[0], origin);
    }

    #[test]
    fn point_count_scales_with_distance() {
        assert_eq!(point_count(0.0), 2);
        assert_eq!(point_count(1.0), 6);
        assert_eq!(point_count(5.0), 26);
        assert_eq!(point_count(500.0), 60);
    }
}
