//! Region overlay classification pipeline.
//!
//! Loads a region collection and a route, classifies each region by
//! whether the route crosses it, and writes a styled GeoJSON overlay.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use madrone::models::Route;
use madrone::overlay::{
    classify, classify_parallel, OverlayPolicy, DEFAULT_CLEAR_OPACITY, DEFAULT_FILL_OPACITY,
};
use madrone::render::{self, DEFAULT_FILL, DEFAULT_STROKE};
use madrone::sources;

#[derive(Parser, Debug)]
#[command(name = "classify")]
#[command(about = "Classify regions by route crossing and emit styled GeoJSON")]
struct Args {
    /// GeoJSON file with region polygons
    #[arg(short, long)]
    regions: PathBuf,

    /// Route file: GeoJSON LineString, or CSV with lat/lon columns
    #[arg(long)]
    route: PathBuf,

    /// Output GeoJSON file
    #[arg(short, long, default_value = "overlay.geojson")]
    out: PathBuf,

    /// Dim regions the route does not cross
    #[arg(long)]
    highlight: bool,

    /// Fill opacity for crossed regions
    #[arg(long, default_value_t = DEFAULT_FILL_OPACITY)]
    fill_opacity: f64,

    /// Fill opacity for clear regions, used with --highlight
    #[arg(long, default_value_t = DEFAULT_CLEAR_OPACITY)]
    clear_opacity: f64,

    /// Fill color
    #[arg(long, default_value = DEFAULT_FILL)]
    fill: String,

    /// Classify regions on multiple threads
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Madrone Overlay Classifier");

    let regions = sources::geojson::load_regions(&args.regions)?;
    let route = load_route(&args.route)?;

    let policy = if args.highlight {
        OverlayPolicy::highlight(args.fill_opacity, args.clear_opacity)
    } else {
        OverlayPolicy::uniform(args.fill_opacity)
    };

    let overlays = if args.parallel {
        classify_parallel(&route, &regions, policy)
    } else {
        classify(&route, &regions, policy)
    };

    let crossed = overlays.iter().filter(|o| o.crossed).count();
    info!(
        "Classified {} regions ({} crossed, {} skipped)",
        overlays.len(),
        crossed,
        regions.len() - overlays.len()
    );

    let mut collection = render::overlay_collection(&overlays, &args.fill, DEFAULT_STROKE);
    collection.features.push(render::route_feature(&route));

    render::write_collection(&args.out, &collection)?;
    info!("Wrote {}", args.out.display());

    Ok(())
}

fn load_route(path: &Path) -> Result<Route> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => sources::csv::load_waypoints(path),
        _ => sources::geojson::load_route(path),
    }
}
