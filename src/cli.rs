//! Command-line interface components.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "facilities-index")]
#[command(about = "Load a facilities JSON-lines dataset and run proximity queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the facilities dataset (newline-delimited JSON)
    #[arg(value_name = "DATASET_PATH")]
    pub dataset_path: PathBuf,

    /// Query facilities whose geohash starts with this prefix
    #[arg(long, value_name = "PREFIX", conflicts_with_all = ["point", "id"])]
    pub geohash: Option<String>,

    /// Query facilities near a point, given as "LAT,LNG"
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true, conflicts_with = "id")]
    pub point: Option<String>,

    /// Resolve a single facility by its key ID
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Maximum number of query results to print
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Print query results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the `--point` argument into a latitude/longitude pair.
    pub fn parse_point(&self) -> Result<Option<(f64, f64)>> {
        let Some(raw) = &self.point else {
            return Ok(None);
        };
        let (lat, lng) = raw
            .split_once(',')
            .context("--point expects \"LAT,LNG\"")?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .with_context(|| format!("invalid latitude '{}'", lat.trim()))?;
        let longitude: f64 = lng
            .trim()
            .parse()
            .with_context(|| format!("invalid longitude '{}'", lng.trim()))?;
        Ok(Some((latitude, longitude)))
    }
}
