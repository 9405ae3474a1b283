//! Precipitation / soil-moisture / soil-temperature signal.
//!
//! Two sources exist and are never mixed in one call path:
//!   - Hyperlocal: per-coordinate samples (inches, °C, volumetric fraction),
//!     memoized in a run-scoped cache keyed by rounded coordinates.
//!   - Regional: one coarse document bucketing the AOI into three named
//!     regions (inches, moisture as a 0-100 percentage, temp anomaly only).
//!     Percentage moisture has its own thresholds, and with no soil
//!     temperature available the cold-shock test falls back to a
//!     late-autumn month window.
//!
//! Any lookup failure degrades to the neutral factor, never an error.
use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geo::LonLat;
use crate::guilds::FruitingThresholds;
use crate::signals::NEUTRAL;

// ── Samples and cache ────────────────────────────────────────────────────────

/// Aggregated 14-day conditions at one coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherSample {
    pub precip_14d_in: f64,
    pub soil_temp_c: f64,
    /// Volumetric water content, 0-1.
    #[serde(alias = "soil_moisture_m3")]
    pub soil_moisture_fraction: f64,
}

/// Coordinates rounded to 3 decimal degrees (≈100 m), deduplicating
/// near-identical lookups within one run.
fn cache_key(point: LonLat) -> (i64, i64) {
    ((point.lon * 1000.0).round() as i64, (point.lat * 1000.0).round() as i64)
}

/// Run-scoped memo of hyperlocal lookups. Failed lookups are memoized too,
/// so one unreachable coordinate costs one lookup per run.
#[derive(Debug, Default)]
pub struct WeatherCache {
    entries: HashMap<(i64, i64), Option<WeatherSample>>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pre-seed a sample, for tests and cache-warm files.
    pub fn insert(&mut self, point: LonLat, sample: WeatherSample) {
        self.entries.insert(cache_key(point), Some(sample));
    }

    fn get_or_fetch(
        &mut self,
        point: LonLat,
        lookup: &dyn WeatherLookup,
    ) -> Option<WeatherSample> {
        *self
            .entries
            .entry(cache_key(point))
            .or_insert_with(|| lookup.sample(point))
    }
}

// ── Sources ──────────────────────────────────────────────────────────────────

/// Per-coordinate sample source. Implementations are blocking from the
/// pipeline's perspective; a failed or timed-out fetch returns `None`.
pub trait WeatherLookup {
    fn sample(&self, point: LonLat) -> Option<WeatherSample>;
}

/// Reads cache-warm sample files (`{lat:.3}_{lon:.3}.json`) written by the
/// hyperlocal fetch collaborator.
pub struct FileLookup {
    dir: PathBuf,
}

impl FileLookup {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl WeatherLookup for FileLookup {
    fn sample(&self, point: LonLat) -> Option<WeatherSample> {
        let path = self
            .dir
            .join(format!("{:.3}_{:.3}.json", point.lat, point.lon));
        let bytes = std::fs::read(path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// The coarse fallback document as the regional fetch collaborator writes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionalReport {
    pub generated_at: String,
    pub regions: HashMap<String, RegionConditions>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegionConditions {
    pub precip_total_14d_in: f64,
    /// 0-100 percentage, NOT unit-compatible with the hyperlocal fraction.
    pub soil_moisture_pct: f64,
    pub temp_anomaly_c: f64,
}

/// Bucket a point into one of the report's named regions.
/// North of 39°N is the north coast; east of 122°W is the Sierra foothills;
/// everything else falls to the Bay Area.
pub fn bucket_region(point: LonLat) -> &'static str {
    if point.lat >= 39.0 {
        "north_coast"
    } else if point.lon >= -122.0 {
        "sierra_foothills"
    } else {
        "bay_area"
    }
}

/// Which signal source is authoritative for this run. An explicit
/// configuration choice; the two unit regimes are never consulted together.
pub enum WeatherSource {
    Hyperlocal(Box<dyn WeatherLookup>),
    Regional(RegionalReport),
    /// No weather data at all: every score is neutral.
    Neutral,
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Soil temperature (°C) below which a cold shock is in effect.
const SHOCK_SOIL_TEMP_C: f64 = 15.0;
/// Regional fallback: months treated as the cold-shock window.
const SHOCK_MONTHS: [u32; 3] = [10, 11, 12];
/// Hard floor returned when the last 14 days were too dry to fruit.
const TOO_DRY_FLOOR: f64 = 0.1;
/// Rain response saturates at 1.5× the guild minimum.
const RAIN_CAP: f64 = 1.5;

/// Weather signal bound to one source, owning the run-scoped cache.
pub struct WeatherSignal {
    source: WeatherSource,
    cache: WeatherCache,
}

impl WeatherSignal {
    pub fn new(source: WeatherSource) -> Self {
        Self {
            source,
            cache: WeatherCache::new(),
        }
    }

    /// Pre-seed the hyperlocal cache (tests, warm-start).
    pub fn seed(&mut self, point: LonLat, sample: WeatherSample) {
        self.cache.insert(point, sample);
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Multiplicative weather factor for one point and guild.
    /// `month` is only consulted by the regional shock fallback.
    pub fn score(&mut self, point: LonLat, thresholds: &FruitingThresholds, month: u32) -> f64 {
        match &self.source {
            WeatherSource::Neutral => NEUTRAL,
            WeatherSource::Regional(report) => {
                let Some(region) = report.regions.get(bucket_region(point)) else {
                    return NEUTRAL;
                };
                regional_score(*region, thresholds, month)
            }
            WeatherSource::Hyperlocal(lookup) => {
                // Split borrow: the cache is mutated while the source is read.
                let Some(sample) = self.cache.get_or_fetch(point, lookup.as_ref()) else {
                    return NEUTRAL;
                };
                hyperlocal_score(sample, thresholds)
            }
        }
    }
}

/// Score from a hyperlocal sample (volumetric moisture fraction, real soil
/// temperature).
pub fn hyperlocal_score(sample: WeatherSample, thresholds: &FruitingThresholds) -> f64 {
    if sample.precip_14d_in < thresholds.min_rain_in * 0.5 {
        return TOO_DRY_FLOOR;
    }

    let rain_score = (sample.precip_14d_in / thresholds.min_rain_in).min(RAIN_CAP);

    let moisture_score = if sample.soil_moisture_fraction > 0.35 {
        1.2
    } else if sample.soil_moisture_fraction < 0.15 {
        0.5
    } else {
        1.0
    };

    let shock_score =
        if thresholds.needs_temperature_shock && sample.soil_temp_c < SHOCK_SOIL_TEMP_C {
            1.3
        } else {
            1.0
        };

    rain_score * moisture_score * shock_score
}

/// Score from a regional aggregate (percentage moisture, no soil
/// temperature; the calendar month stands in for the shock test).
pub fn regional_score(region: RegionConditions, thresholds: &FruitingThresholds, month: u32) -> f64 {
    if region.precip_total_14d_in < thresholds.min_rain_in * 0.5 {
        return TOO_DRY_FLOOR;
    }

    let rain_score = (region.precip_total_14d_in / thresholds.min_rain_in).min(RAIN_CAP);

    let moisture_score = if region.soil_moisture_pct > 70.0 {
        1.2
    } else if region.soil_moisture_pct < 30.0 {
        0.5
    } else {
        1.0
    };

    let shock_score = if thresholds.needs_temperature_shock && SHOCK_MONTHS.contains(&month) {
        1.3
    } else {
        1.0
    };

    rain_score * moisture_score * shock_score
}
