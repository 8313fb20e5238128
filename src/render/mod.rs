//! Styled GeoJSON output for map viewers.
//!
//! Overlay and place collections are annotated with simplestyle
//! properties (`fill`, `fill-opacity`, `stroke`, ...) so a JSON-based map
//! viewer renders them without further configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

use crate::models::{Place, Route};
use crate::overlay::RegionOverlay;

pub const DEFAULT_FILL: &str = "#2166ac";
pub const DEFAULT_STROKE: &str = "#1a1a1a";
pub const ROUTE_STROKE: &str = "#d6604d";

/// One styled Feature per classified region, in classification order
pub fn overlay_collection(
    overlays: &[RegionOverlay<'_>],
    fill: &str,
    stroke: &str,
) -> FeatureCollection {
    let bbox = overlays
        .iter()
        .filter_map(|o| o.region.bbox())
        .reduce(|a, b| a.merge(&b))
        .map(|b| vec![b.min_lon, b.min_lat, b.max_lon, b.max_lat]);

    let features = overlays
        .iter()
        .map(|o| overlay_feature(o, fill, stroke))
        .collect();

    FeatureCollection {
        bbox,
        features,
        foreign_members: Some(stamp()),
    }
}

fn overlay_feature(overlay: &RegionOverlay<'_>, fill: &str, stroke: &str) -> Feature {
    let rings = overlay.shape.rings();
    let value = if rings.len() == 1 {
        geojson::Value::from(&geo_types::Polygon::new(rings[0].clone(), vec![]))
    } else {
        let multi = geo_types::MultiPolygon::new(
            rings
                .iter()
                .map(|ring| geo_types::Polygon::new(ring.clone(), vec![]))
                .collect(),
        );
        geojson::Value::from(&multi)
    };

    let mut properties = JsonObject::new();
    properties.insert("title".to_string(), JsonValue::from(overlay.region.name.clone()));
    properties.insert("fill".to_string(), JsonValue::from(fill));
    properties.insert(
        "fill-opacity".to_string(),
        JsonValue::from(overlay.fill_opacity),
    );
    properties.insert("stroke".to_string(), JsonValue::from(stroke));
    properties.insert("stroke-width".to_string(), JsonValue::from(1.0));
    properties.insert("crossed".to_string(), JsonValue::from(overlay.crossed));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// The route as a styled LineString feature
pub fn route_feature(route: &Route) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("title".to_string(), JsonValue::from("route"));
    properties.insert("stroke".to_string(), JsonValue::from(ROUTE_STROKE));
    properties.insert("stroke-width".to_string(), JsonValue::from(2.5));

    let b = route.bbox();

    Feature {
        bbox: Some(vec![b.min_lon, b.min_lat, b.max_lon, b.max_lat]),
        geometry: Some(Geometry::new(geojson::Value::from(&route.line_string()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Geocoded places as Point features
pub fn place_collection(places: &[Place]) -> FeatureCollection {
    let features = places
        .iter()
        .map(|place| {
            let point = geo_types::Point::from(place.location);

            let mut properties = JsonObject::new();
            properties.insert("title".to_string(), JsonValue::from(place.name.clone()));
            properties.insert("address".to_string(), JsonValue::from(place.address.clone()));
            if let Some(region) = &place.region {
                properties.insert("region".to_string(), JsonValue::from(region.clone()));
            }

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(stamp()),
    }
}

pub fn write_collection<P: AsRef<Path>>(path: P, collection: &FeatureCollection) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(collection)
        .context("Failed to serialize FeatureCollection")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn stamp() -> JsonObject {
    let mut members = JsonObject::new();
    members.insert(
        "generated_at".to_string(),
        JsonValue::from(Utc::now().to_rfc3339()),
    );
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, Region};
    use crate::overlay::{classify, OverlayPolicy};
    use geo_types::polygon;

    fn regions() -> Vec<Region> {
        vec![
            Region::simple(
                "hit",
                polygon![
                    (x: 0.0, y: 0.0),
                    (x: 1.0, y: 0.0),
                    (x: 1.0, y: 1.0),
                    (x: 0.0, y: 1.0),
                ],
            ),
            Region::simple(
                "miss",
                polygon![
                    (x: 5.0, y: 0.0),
                    (x: 6.0, y: 0.0),
                    (x: 6.0, y: 1.0),
                    (x: 5.0, y: 1.0),
                ],
            ),
        ]
    }

    fn route() -> Route {
        Route::new(vec![GeoPoint::new(0.5, -1.0), GeoPoint::new(0.5, 2.0)]).unwrap()
    }

    #[test]
    fn test_overlay_collection_is_styled() {
        let regions = regions();
        let overlays = classify(&route(), &regions, OverlayPolicy::highlight_default());
        let collection = overlay_collection(&overlays, DEFAULT_FILL, DEFAULT_STROKE);

        assert_eq!(collection.features.len(), 2);

        let first = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(first["title"], JsonValue::from("hit"));
        assert_eq!(first["fill"], JsonValue::from(DEFAULT_FILL));
        assert_eq!(first["fill-opacity"], JsonValue::from(0.4));
        assert_eq!(first["crossed"], JsonValue::from(true));

        let second = collection.features[1].properties.as_ref().unwrap();
        assert_eq!(second["fill-opacity"], JsonValue::from(0.1));
        assert_eq!(second["crossed"], JsonValue::from(false));

        assert_eq!(collection.bbox, Some(vec![0.0, 0.0, 6.0, 1.0]));
    }

    #[test]
    fn test_collection_carries_timestamp() {
        let collection = overlay_collection(&[], DEFAULT_FILL, DEFAULT_STROKE);
        let members = collection.foreign_members.unwrap();
        assert!(members.contains_key("generated_at"));
    }

    #[test]
    fn test_route_feature_is_line_string() {
        let feature = route_feature(&route());
        let geometry = feature.geometry.unwrap();
        assert!(matches!(geometry.value, geojson::Value::LineString(_)));
    }

    #[test]
    fn test_place_collection_properties() {
        let mut place = Place::new("Boba One", "12 Main St", GeoPoint::new(0.5, 0.5));
        place.region = Some("mainland".to_string());

        let collection = place_collection(&[place]);
        assert_eq!(collection.features.len(), 1);

        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["region"], JsonValue::from("mainland"));
        assert_eq!(props["address"], JsonValue::from("12 Main St"));
    }
}
