//! Heatmap generation tool: loads the cached collaborator inputs
//! (observation CSV, weather JSON, host-tree GeoJSON directory), scores
//! every sighting, and writes one GeoJSON layer file per guild.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;

use mycocast_core::guilds::builtin_profiles;
use mycocast_core::heatmap::assemble;
use mycocast_core::observations::load_observations;
use mycocast_core::scoring::ScoringEngine;
use mycocast_core::signals::weather::{FileLookup, RegionalReport};
use mycocast_core::signals::{HostTreeIndex, WeatherSource};

#[derive(Parser, Debug)]
#[command(
    name = "heatmap",
    about = "Generate per-guild fruiting-intensity GeoJSON layers from cached sighting data"
)]
struct Args {
    /// Observation table CSV (Subject, Current Status, Recent Locations).
    #[arg(long, default_value = "data/gather_guild_data.csv")]
    observations: PathBuf,

    /// Regional weather summary JSON (coarse fallback source).
    #[arg(long, default_value = "data/weather_live.json")]
    weather: PathBuf,

    /// Directory of hyperlocal per-coordinate weather samples. When given,
    /// this source is authoritative and the regional document is ignored.
    #[arg(long)]
    weather_cache_dir: Option<PathBuf>,

    /// Directory of per-species host-tree point collections.
    #[arg(long, default_value = "data/hosts")]
    hosts_dir: PathBuf,

    /// Output directory for {guild-slug}.json layer files.
    #[arg(short, long, default_value = "data/layers")]
    output: PathBuf,

    /// PRNG seed for geocoding jitter. Omit for a fresh seed per run; pass
    /// a fixed value to reproduce a previous run exactly.
    #[arg(long)]
    seed: Option<u64>,

    /// Calendar month (1-12) to score against. Defaults to the current month.
    #[arg(long)]
    month: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let observations = load_observations(&args.observations)
        .with_context(|| format!("reading observations from {}", args.observations.display()))?;

    let weather_source = select_weather_source(&args);
    let hosts = HostTreeIndex::load_dir(&args.hosts_dir)
        .with_context(|| format!("loading host trees from {}", args.hosts_dir.display()))?;
    if hosts.species_count() == 0 {
        eprintln!(
            "No host-tree data under {}; host factor will be penalty/neutral only.",
            args.hosts_dir.display()
        );
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let month = args
        .month
        .unwrap_or_else(|| chrono::Local::now().month());
    println!("Scoring {} observations for month {month} (seed {seed})...", observations.len());

    let profiles = builtin_profiles();
    let mut engine = ScoringEngine::new(seed, weather_source, hosts, month);
    let layers = assemble(&profiles, &observations, &mut engine);

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output dir {}", args.output.display()))?;

    let mut total_scored = 0;
    let mut total_skipped = 0;
    for layer in &layers {
        let path = args.output.join(format!("{}.json", layer.slug));
        let json = serde_json::to_string(&layer.collection)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!(
            "Generated {} with {} points ({} unresolved locations skipped)",
            path.display(),
            layer.collection.features.len(),
            layer.summary.skipped_unresolved
        );
        total_scored += layer.summary.scored;
        total_skipped += layer.summary.skipped_unresolved;
    }

    println!(
        "Done: {total_scored} points across {} layers, {total_skipped} locations unresolved, {} weather lookups cached.",
        layers.len(),
        engine.weather_cache_len()
    );
    Ok(())
}

/// Pick the run's weather source. Hyperlocal when a cache directory is
/// given; else the regional document when it parses; else neutral (every
/// weather factor 1.0). The regimes are never mixed.
fn select_weather_source(args: &Args) -> WeatherSource {
    if let Some(dir) = &args.weather_cache_dir {
        return WeatherSource::Hyperlocal(Box::new(FileLookup::new(dir.clone())));
    }
    match fs::read(&args.weather) {
        Ok(bytes) => match serde_json::from_slice::<RegionalReport>(&bytes) {
            Ok(report) => WeatherSource::Regional(report),
            Err(e) => {
                eprintln!(
                    "Malformed weather summary {}: {e}; scoring with neutral weather.",
                    args.weather.display()
                );
                WeatherSource::Neutral
            }
        },
        Err(_) => {
            eprintln!(
                "No weather summary at {}; scoring with neutral weather.",
                args.weather.display()
            );
            WeatherSource::Neutral
        }
    }
}
