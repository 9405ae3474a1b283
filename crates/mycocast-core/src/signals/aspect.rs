//! Slope-aspect signal.
//!
//! North- and east-facing slopes hold moisture and fruit better than
//! sun-baked south faces. True aspect needs an elevation grid, which is an
//! external collaborator not wired up yet, so the provider is a trait:
//! the scoring engine only sees `aspect(point) -> factor`, and a real
//! elevation-derived implementation can replace [`PseudoAspect`] without
//! touching the engine.
use crate::geo::LonLat;

/// North-facing slopes: shaded, moist.
const NORTH_FACTOR: f64 = 1.3;
/// East-facing: morning sun only.
const EAST_FACTOR: f64 = 1.2;
/// South-facing: dries fastest.
const SOUTH_FACTOR: f64 = 0.7;
/// West-facing: afternoon sun.
const WEST_FACTOR: f64 = 0.9;

/// Capability seam for the aspect signal.
pub trait AspectProvider {
    /// Multiplicative factor for the slope direction at `point`.
    fn aspect(&self, point: LonLat) -> f64;
}

/// Deterministic placeholder: hashes the rounded coordinates into a
/// pseudo-aspect angle (degrees clockwise from North) and buckets it into
/// the four compass quadrants. Explicitly a mock; the quadrant multipliers
/// are the contract a real provider must keep.
#[derive(Debug, Default, Clone, Copy)]
pub struct PseudoAspect;

impl PseudoAspect {
    /// Pseudo-aspect angle in [0, 360), stable across runs for the same
    /// coordinates (rounded to 3 decimals, the weather cache precision).
    pub fn angle_deg(point: LonLat) -> f64 {
        let xi = (point.lon * 1000.0).round() as i64 as u64;
        let yi = (point.lat * 1000.0).round() as i64 as u64;
        let h = xi
            .wrapping_mul(2654435761)
            .wrapping_add(yi.wrapping_mul(2246822519));
        let h = h ^ (h >> 16);
        (h % 360) as f64
    }
}

impl AspectProvider for PseudoAspect {
    fn aspect(&self, point: LonLat) -> f64 {
        factor_for_angle(Self::angle_deg(point))
    }
}

/// Quadrant multipliers, angle clockwise from North:
/// N = [315, 360) ∪ [0, 45), E = [45, 135), S = [135, 225), W = [225, 315).
pub fn factor_for_angle(angle_deg: f64) -> f64 {
    let a = angle_deg.rem_euclid(360.0);
    if !(45.0..315.0).contains(&a) {
        NORTH_FACTOR
    } else if a < 135.0 {
        EAST_FACTOR
    } else if a < 225.0 {
        SOUTH_FACTOR
    } else {
        WEST_FACTOR
    }
}
