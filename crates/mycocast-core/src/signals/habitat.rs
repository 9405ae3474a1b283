//! Land-cover habitat mask.
//!
//! A real implementation consults the cached land-cover raster (an external
//! fetch collaborator) and returns 0.0/1.0 or a partial score for
//! non-habitat cover classes. Until that is wired up, [`OpenHabitat`] passes
//! every point. The trait is the substitution seam; the scoring engine's
//! contract does not change when a real provider lands.
use crate::geo::LonLat;

/// Capability seam for the habitat mask.
pub trait HabitatProvider {
    /// 1.0 = valid habitat, 0.0 = excluded cover class; partial scores
    /// are allowed.
    fn mask(&self, point: LonLat) -> f64;
}

/// Stub mask: every point is valid habitat.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenHabitat;

impl HabitatProvider for OpenHabitat {
    fn mask(&self, _point: LonLat) -> f64 {
        1.0
    }
}
