/// Geographic point type and great-circle proximity search.
/// All coordinate math uses f64 for precision.
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in geographic coordinates, GeoJSON axis order (longitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    /// Longitude in degrees, -180 to +180.
    pub lon: f64,
    /// Latitude in degrees, -90 to +90.
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convert to radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.lon.to_radians(), self.lat.to_radians())
    }
}

/// Great-circle distance between two points in kilometres (haversine).
///
/// The haversine intermediate is clamped to [0, 1] before `asin`, so
/// identical points return exactly 0.0 instead of NaN from float drift.
pub fn distance_km(a: LonLat, b: LonLat) -> f64 {
    let (lon1, lat1) = a.to_radians();
    let (lon2, lat2) = b.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Default search radius for host-tree proximity, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// True if any candidate lies within `radius_km` of `point`.
/// Short-circuits on the first hit.
pub fn within_radius(point: LonLat, candidates: &[LonLat], radius_km: f64) -> bool {
    candidates
        .iter()
        .any(|&c| distance_km(point, c) <= radius_km)
}
