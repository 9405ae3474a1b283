//! Host-tree proximity bonus.
//!
//! Mapped occurrences of each host species are loaded once per run from
//! per-species GeoJSON point collections (as the host-tree fetch
//! collaborator writes them) and held immutable in a [`HostTreeIndex`].
//! Only `geometry.coordinates` is read; feature properties are ignored.
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::geo::{within_radius, LonLat, DEFAULT_RADIUS_KM};
use crate::guilds::HostProfile;
use crate::signals::NEUTRAL;
use crate::LoadError;

/// Primary host within range: dominant evidence.
const PRIMARY_BONUS: f64 = 1.5;
/// Only a secondary host within range.
const SECONDARY_BONUS: f64 = 1.2;
/// No mapped host nearby: penalized, not zeroed. Absence of a mapped tree
/// is evidence, not proof, of absent habitat.
const NO_HOST_PENALTY: f64 = 0.8;

/// Species id → mapped occurrence coordinates. Built once per run.
#[derive(Debug, Default)]
pub struct HostTreeIndex {
    species: HashMap<String, Vec<LonLat>>,
}

#[derive(Deserialize)]
struct PointCollection {
    features: Vec<PointFeature>,
}

#[derive(Deserialize)]
struct PointFeature {
    geometry: PointGeometry,
}

#[derive(Deserialize)]
struct PointGeometry {
    /// GeoJSON order: [longitude, latitude].
    coordinates: [f64; 2],
}

impl HostTreeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a species' occurrence points directly (tests, pre-parsed data).
    pub fn insert(&mut self, species: impl Into<String>, points: Vec<LonLat>) {
        self.species.insert(species.into(), points);
    }

    /// Parse one species' point collection from GeoJSON bytes.
    pub fn insert_geojson(&mut self, species: &str, bytes: &[u8]) -> Result<(), LoadError> {
        let collection: PointCollection = serde_json::from_slice(bytes)?;
        let points = collection
            .features
            .into_iter()
            .map(|f| LonLat::new(f.geometry.coordinates[0], f.geometry.coordinates[1]))
            .collect();
        self.species.insert(species.to_string(), points);
        Ok(())
    }

    /// Load every `{species}.json` in a directory. A missing directory is an
    /// empty index (the signal degrades to the no-host penalty paths).
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        let mut index = Self::new();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(index),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(species) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };
            let bytes = std::fs::read(&path)?;
            // One malformed species file loses that species, not the run.
            let _ = index.insert_geojson(&species, &bytes);
        }
        Ok(index)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    fn points_for(&self, species: &str) -> &[LonLat] {
        self.species.get(species).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Multiplicative host factor for one point and guild.
    ///
    /// Any primary host within 5 km returns the primary bonus immediately;
    /// otherwise any secondary host within 5 km returns the secondary bonus;
    /// otherwise the no-host penalty. Guilds with no host profile at all
    /// (burn followers) are neutral.
    pub fn bonus(&self, point: LonLat, hosts: &HostProfile) -> f64 {
        if hosts.is_empty() {
            return NEUTRAL;
        }

        for species in &hosts.primary {
            if within_radius(point, self.points_for(species), DEFAULT_RADIUS_KM) {
                return PRIMARY_BONUS;
            }
        }

        for species in &hosts.secondary {
            if within_radius(point, self.points_for(species), DEFAULT_RADIUS_KM) {
                return SECONDARY_BONUS;
            }
        }

        NO_HOST_PENALTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oak_and_fir_profile() -> HostProfile {
        HostProfile {
            primary: vec!["coast_live_oak"],
            secondary: vec!["douglas_fir"],
        }
    }

    /// Offset a point due north by `km`.
    fn north_of(p: LonLat, km: f64) -> LonLat {
        LonLat::new(p.lon, p.lat + km / 111.195)
    }

    #[test]
    fn primary_within_radius_dominates() {
        let here = LonLat::new(-123.0, 38.5);
        let mut index = HostTreeIndex::new();
        index.insert("coast_live_oak", vec![north_of(here, 4.99)]);
        index.insert("douglas_fir", vec![north_of(here, 1.0)]);
        // Primary is checked first even though the secondary is closer.
        assert_eq!(index.bonus(here, &oak_and_fir_profile()), 1.5);
    }

    #[test]
    fn secondary_only_gives_smaller_bonus() {
        let here = LonLat::new(-123.0, 38.5);
        let mut index = HostTreeIndex::new();
        index.insert("coast_live_oak", vec![north_of(here, 5.01)]);
        index.insert("douglas_fir", vec![north_of(here, 4.99)]);
        assert_eq!(index.bonus(here, &oak_and_fir_profile()), 1.2);
    }

    #[test]
    fn no_host_in_range_is_penalized() {
        let here = LonLat::new(-123.0, 38.5);
        let mut index = HostTreeIndex::new();
        index.insert("coast_live_oak", vec![north_of(here, 5.01)]);
        assert_eq!(index.bonus(here, &oak_and_fir_profile()), 0.8);
    }

    #[test]
    fn unmapped_species_behaves_as_no_points() {
        let here = LonLat::new(-123.0, 38.5);
        let index = HostTreeIndex::new();
        assert_eq!(index.bonus(here, &oak_and_fir_profile()), 0.8);
    }

    #[test]
    fn empty_host_profile_is_neutral() {
        let here = LonLat::new(-123.0, 38.5);
        let index = HostTreeIndex::new();
        let no_hosts = HostProfile {
            primary: vec![],
            secondary: vec![],
        };
        assert_eq!(index.bonus(here, &no_hosts), 1.0);
    }

    #[test]
    fn parses_geojson_point_collection() {
        let geojson = br#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-123.01, 38.51] },
                    "properties": { "id": 1, "observed_on": "2025-11-02", "quality": "research" }
                }
            ]
        }"#;
        let mut index = HostTreeIndex::new();
        index
            .insert_geojson("tanoak", geojson)
            .expect("valid geojson should parse");
        assert_eq!(index.species_count(), 1);

        let profile = HostProfile {
            primary: vec!["tanoak"],
            secondary: vec![],
        };
        assert_eq!(index.bonus(LonLat::new(-123.01, 38.51), &profile), 1.5);
    }
}
