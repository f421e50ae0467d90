use crate::geometry::TravelMode;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Spread of the uniform noise applied to the overall route score.
pub const ROUTE_JITTER: f64 = 1.0;

/// Distance-banded score before any noise. `distance_km` is in kilometres.
pub fn base_score(mode: TravelMode, distance_km: f64) -> f64 {
    match mode {
        TravelMode::Walking if distance_km < 1.0 => 9.0,
        TravelMode::Walking if distance_km < 3.0 => 7.0,
        TravelMode::Walking => 5.0,
        TravelMode::Driving if distance_km < 5.0 => 8.0,
        TravelMode::Driving => 6.0,
    }
}

/// Adds uniform noise in `[-spread, +spread]`, clamps to `[1, 10]`, rounds to one decimal.
pub fn jittered(base: f64, spread: f64, rng: &mut fastrand::Rng) -> f64 {
    let noise = (rng.f64() * 2.0 - 1.0) * spread;
    round_to_tenth((base + noise).clamp(MIN_SCORE, MAX_SCORE))
}

/// Base score for the mode and distance with the route-level jitter applied.
pub fn compute_base_score(mode: TravelMode, distance_km: f64, rng: &mut fastrand::Rng) -> f64 {
    jittered(base_score(mode, distance_km), ROUTE_JITTER, rng)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
