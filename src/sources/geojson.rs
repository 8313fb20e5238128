//! Region and route loading from GeoJSON files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use geojson::{Feature, GeoJson};
use tracing::{debug, info};

use crate::models::{GeoPoint, GeometryClass, Region, Route};

/// Load a region collection from a FeatureCollection file.
///
/// Polygon features become simple regions, MultiPolygon features composite
/// ones; features with any other geometry are skipped. Files ending in
/// `.gz` are decompressed transparently.
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<Vec<Region>> {
    let path = path.as_ref();
    let regions = parse_regions(&read_to_string(path)?)?;
    info!("Loaded {} regions from {}", regions.len(), path.display());
    Ok(regions)
}

/// Load a route from the first LineString feature in a GeoJSON file
pub fn load_route<P: AsRef<Path>>(path: P) -> Result<Route> {
    let path = path.as_ref();
    let route = parse_route(&read_to_string(path)?)?;
    info!(
        "Loaded route with {} waypoints from {}",
        route.len(),
        path.display()
    );
    Ok(route)
}

pub fn parse_regions(content: &str) -> Result<Vec<Region>> {
    let geojson: GeoJson = content.parse().context("Failed to parse GeoJSON")?;
    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("Expected a FeatureCollection"),
    };

    let mut regions = Vec::new();
    for (i, feature) in collection.features.iter().enumerate() {
        match region_from_feature(feature, i) {
            Some(region) => regions.push(region),
            None => {
                // Only surface-class geometries become regions
                let class = feature
                    .geometry
                    .as_ref()
                    .and_then(|g| geo_types::Geometry::<f64>::try_from(g.value.clone()).ok())
                    .and_then(|g| GeometryClass::of(&g));
                debug!("Skipping feature {} with geometry class {:?}", i, class);
            }
        }
    }
    Ok(regions)
}

pub fn parse_route(content: &str) -> Result<Route> {
    let geojson: GeoJson = content.parse().context("Failed to parse GeoJSON")?;

    let line = match geojson {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .filter_map(|f| f.geometry)
            .find_map(|g| line_from_value(g.value)),
        GeoJson::Feature(f) => f.geometry.and_then(|g| line_from_value(g.value)),
        GeoJson::Geometry(g) => line_from_value(g.value),
    }
    .context("No LineString geometry found")?;

    let waypoints = line.0.iter().map(|c| GeoPoint::new(c.y, c.x)).collect();
    Ok(Route::new(waypoints)?)
}

fn region_from_feature(feature: &Feature, index: usize) -> Option<Region> {
    let geometry = feature.geometry.as_ref()?;
    let name = feature_name(feature).unwrap_or_else(|| format!("region-{}", index));

    match &geometry.value {
        geojson::Value::Polygon(_) => {
            let polygon = geo_types::Polygon::<f64>::try_from(geometry.value.clone()).ok()?;
            Some(Region::simple(name, polygon))
        }
        geojson::Value::MultiPolygon(_) => {
            let multi = geo_types::MultiPolygon::<f64>::try_from(geometry.value.clone()).ok()?;
            Some(Region::composite(name, multi))
        }
        _ => None,
    }
}

fn line_from_value(value: geojson::Value) -> Option<geo_types::LineString<f64>> {
    match value {
        geojson::Value::LineString(_) => geo_types::LineString::<f64>::try_from(value).ok(),
        _ => None,
    }
}

fn feature_name(feature: &Feature) -> Option<String> {
    for key in ["name", "NAME", "id"] {
        if let Some(value) = feature.property(key) {
            if let Some(s) = value.as_str() {
                return Some(s.to_string());
            }
        }
    }
    None
}

fn read_to_string(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content)
}
