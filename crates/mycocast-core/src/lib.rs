//! Fruiting-intensity heatmaps for NorCal mushroom guilds.
//!
//! The pipeline takes geocoded sighting reports, derives environmental
//! signals (precipitation and soil state, host-tree proximity, slope
//! aspect, seasonal phenology, habitat mask) and combines them into one
//! bounded intensity per sighting, emitted as a GeoJSON point layer per
//! guild. The scoring is an explicit hand-tuned heuristic; every constant
//! is part of the contract.
//!
//! Data ingestion (weather, host trees, land cover) happens in external
//! fetch collaborators; this crate only reads their cached JSON/CSV output.

pub mod gazetteer;
pub mod geo;
pub mod guilds;
pub mod heatmap;
pub mod observations;
pub mod scoring;
pub mod signals;

use thiserror::Error;

/// Failures loading cached collaborator inputs. Signal-level gaps never
/// surface here; they degrade to neutral factors inside the pipeline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
