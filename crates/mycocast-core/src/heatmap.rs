//! Per-guild heatmap assembly.
//!
//! Walks every guild over every matching observation, scores each location
//! label, and collects the results into one GeoJSON FeatureCollection per
//! guild. Observations are matched to a guild through the same ordered
//! first-match resolution the profile table documents, so an observation
//! never lands in two layers. Empty collections are valid output.
use serde::Serialize;

use crate::guilds::{resolve_profile, GuildProfile};
use crate::observations::Observation;
use crate::scoring::{FactorBreakdown, ScoringEngine};

// ── GeoJSON output types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    fn new() -> Self {
        Self {
            kind: "FeatureCollection",
            features: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// GeoJSON order: [longitude, latitude].
    pub coordinates: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct FeatureProperties {
    pub intensity: f64,
    pub factors: FactorBreakdown,
    /// Observation status, passed through untouched.
    pub status: String,
    /// Cleaned location label the point was geocoded from.
    pub location: String,
}

// ── Assembly ─────────────────────────────────────────────────────────────────

/// Per-guild outcome counts, for the run summary log.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub scored: usize,
    pub skipped_unresolved: usize,
}

/// One guild's output layer.
pub struct GuildLayer {
    /// Output filename stem (lowercased, hyphenated canonical name).
    pub slug: String,
    pub guild: &'static str,
    pub collection: FeatureCollection,
    pub summary: RunSummary,
}

/// Assemble every guild's heatmap layer from the observation table.
pub fn assemble(
    profiles: &[GuildProfile],
    observations: &[Observation],
    engine: &mut ScoringEngine,
) -> Vec<GuildLayer> {
    profiles
        .iter()
        .map(|profile| assemble_guild(profile, profiles, observations, engine))
        .collect()
}

fn assemble_guild(
    profile: &GuildProfile,
    profiles: &[GuildProfile],
    observations: &[Observation],
    engine: &mut ScoringEngine,
) -> GuildLayer {
    let mut collection = FeatureCollection::new();
    let mut summary = RunSummary::default();

    for obs in observations {
        // First-match resolution: an ambiguous subject belongs to the
        // earliest profile in table order, and only to it.
        let resolved = resolve_profile(profiles, &obs.subject);
        if resolved.map(|p| p.name) != Some(profile.name) {
            continue;
        }

        for label in obs.recent_locations() {
            match engine.score(Some(profile), &label) {
                Some(scored) => {
                    summary.scored += 1;
                    collection.features.push(Feature {
                        kind: "Feature",
                        geometry: PointGeometry {
                            kind: "Point",
                            coordinates: [scored.point.lon, scored.point.lat],
                        },
                        properties: FeatureProperties {
                            intensity: scored.intensity,
                            factors: scored.factors,
                            status: obs.status.clone(),
                            location: scored.location_label,
                        },
                    });
                }
                None => summary.skipped_unresolved += 1,
            }
        }
    }

    GuildLayer {
        slug: profile.layer_slug(),
        guild: profile.name,
        collection,
        summary,
    }
}
