//! Address geocoding pipeline.
//!
//! Reads named addresses from CSV, resolves them to coordinates, tags each
//! with the region containing it, and writes a GeoJSON point collection.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use madrone::geocode::Geocoder;
use madrone::models::Place;
use madrone::overlay::RegionSpatialIndex;
use madrone::render;
use madrone::sources;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "places")]
#[command(about = "Geocode addresses into a GeoJSON point collection")]
struct Args {
    /// CSV file with name and address columns
    #[arg(short, long)]
    addresses: PathBuf,

    /// Optional GeoJSON region file used to tag each place
    #[arg(long)]
    regions: Option<PathBuf>,

    /// TOML config file for the geocoder
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output GeoJSON file
    #[arg(short, long, default_value = "places.geojson")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Madrone Geocoding Pipeline");

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let records = sources::csv::load_addresses(&args.addresses)?;

    let index = match &args.regions {
        Some(path) => Some(RegionSpatialIndex::build(sources::geojson::load_regions(
            path,
        )?)),
        None => None,
    };

    let mut geocoder = Geocoder::new(&config.geocoder)?;

    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);

    let mut places = Vec::new();
    for record in &records {
        bar.set_message(record.name.clone());

        let location = match geocoder.geocode(&record.address).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                warn!("No result for {:?}, skipping {}", record.address, record.name);
                bar.inc(1);
                continue;
            }
            Err(e) => {
                warn!("Geocoding {} failed: {}, skipping", record.name, e);
                bar.inc(1);
                continue;
            }
        };

        let mut place = Place::new(&record.name, &record.address, location);
        if let Some(index) = &index {
            place.region = index
                .locate(location.lon, location.lat)
                .map(|region| region.name.clone());
        }

        places.push(place);
        bar.inc(1);
    }
    bar.finish_and_clear();

    info!("Geocoded {}/{} places", places.len(), records.len());

    render::write_collection(&args.out, &render::place_collection(&places))?;
    info!("Wrote {}", args.out.display());

    Ok(())
}
