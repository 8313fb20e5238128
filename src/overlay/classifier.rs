//! Route-crossing classification for region overlays.

use geo::Intersects;
use geo_types::LineString;
use rayon::prelude::*;
use tracing::debug;

use super::shape::RenderShape;
use crate::models::{Region, Route};

/// Fill opacity applied to region overlays by default
pub const DEFAULT_FILL_OPACITY: f64 = 0.4;

/// Fill opacity for regions the route does not cross, under [`OverlayPolicy::highlight_default`]
pub const DEFAULT_CLEAR_OPACITY: f64 = 0.1;

/// Maps a region's crossing status to a fill opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPolicy {
    crossed: f64,
    clear: f64,
}

impl OverlayPolicy {
    /// Same opacity regardless of crossing status
    pub fn uniform(opacity: f64) -> Self {
        Self {
            crossed: opacity,
            clear: opacity,
        }
    }

    /// Distinct opacities so crossed regions stand out on the map
    pub fn highlight(crossed: f64, clear: f64) -> Self {
        Self { crossed, clear }
    }

    pub fn highlight_default() -> Self {
        Self::highlight(DEFAULT_FILL_OPACITY, DEFAULT_CLEAR_OPACITY)
    }

    pub fn opacity_for(&self, crossed: bool) -> f64 {
        if crossed {
            self.crossed
        } else {
            self.clear
        }
    }
}

impl Default for OverlayPolicy {
    /// Uniform opacity: crossing status does not change the rendered
    /// transparency unless [`OverlayPolicy::highlight`] is chosen explicitly.
    fn default() -> Self {
        Self::uniform(DEFAULT_FILL_OPACITY)
    }
}

/// A region paired with its renderable shape and rendering attribute
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOverlay<'a> {
    pub region: &'a Region,
    pub shape: RenderShape,
    /// Whether any part of the region intersects the route
    pub crossed: bool,
    pub fill_opacity: f64,
}

/// Classify each region by whether the route crosses it.
///
/// Output preserves input order. Regions whose renderable shape cannot be
/// constructed are skipped with a debug log; the rest are unaffected. An
/// empty collection yields an empty output.
pub fn classify<'a>(
    route: &Route,
    regions: &'a [Region],
    policy: OverlayPolicy,
) -> Vec<RegionOverlay<'a>> {
    let line = route.line_string();
    regions
        .iter()
        .filter_map(|region| classify_one(region, &line, policy))
        .collect()
}

/// Same as [`classify`], with per-region work spread across a thread pool.
///
/// Each region's test is independent, so the result is identical to the
/// sequential version, including output order.
pub fn classify_parallel<'a>(
    route: &Route,
    regions: &'a [Region],
    policy: OverlayPolicy,
) -> Vec<RegionOverlay<'a>> {
    let line = route.line_string();
    regions
        .par_iter()
        .filter_map(|region| classify_one(region, &line, policy))
        .collect()
}

fn classify_one<'a>(
    region: &'a Region,
    line: &LineString<f64>,
    policy: OverlayPolicy,
) -> Option<RegionOverlay<'a>> {
    let shape = match RenderShape::build(region) {
        Ok(shape) => shape,
        Err(err) => {
            debug!("Skipping region {}: {}", region.name, err);
            return None;
        }
    };

    // A composite region crosses the route if any of its parts does
    let crossed = region.parts().iter().any(|part| part.intersects(line));

    Some(RegionOverlay {
        region,
        shape,
        crossed,
        fill_opacity: policy.opacity_for(crossed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use geo_types::{polygon, Coord, LineString, MultiPolygon, Polygon};

    fn square_at(x: f64, y: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
        ]
    }

    /// Horizontal route along y = 0.5, from lon `from` to lon `to`
    fn route(from: f64, to: f64) -> Route {
        Route::new(vec![GeoPoint::new(0.5, from), GeoPoint::new(0.5, to)]).unwrap()
    }

    fn degenerate_region(name: &str) -> Region {
        let c = Coord { x: 9.0, y: 9.0 };
        Region::simple(name, Polygon::new(LineString::new(vec![c, c, c, c]), vec![]))
    }

    #[test]
    fn test_crossing_segment_is_detected() {
        let regions = vec![Region::simple("hit", square_at(0.0, 0.0))];
        let overlays = classify(&route(-1.0, 2.0), &regions, OverlayPolicy::default());
        assert_eq!(overlays.len(), 1);
        assert!(overlays[0].crossed);
    }

    #[test]
    fn test_disjoint_segment_is_not_crossed() {
        let regions = vec![Region::simple("miss", square_at(5.0, 0.0))];
        let overlays = classify(&route(-1.0, 2.0), &regions, OverlayPolicy::default());
        assert_eq!(overlays.len(), 1);
        assert!(!overlays[0].crossed);
    }

    #[test]
    fn test_composite_crosses_when_any_part_does() {
        // Route reaches only the second part
        let region = Region::composite(
            "islands",
            MultiPolygon::new(vec![square_at(10.0, 0.0), square_at(1.5, 0.0)]),
        );
        let regions = [region];
        let overlays = classify(&route(0.0, 2.0), &regions, OverlayPolicy::default());
        assert_eq!(overlays.len(), 1);
        assert!(overlays[0].crossed);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let regions = vec![
            Region::simple("a", square_at(0.0, 0.0)),
            Region::simple("b", square_at(5.0, 0.0)),
            Region::simple("c", square_at(1.0, 0.0)),
        ];
        let overlays = classify(&route(-1.0, 2.0), &regions, OverlayPolicy::default());
        let names: Vec<&str> = overlays.iter().map(|o| o.region.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_degenerate_region_is_skipped() {
        let regions = vec![
            Region::simple("a", square_at(0.0, 0.0)),
            degenerate_region("broken"),
            Region::simple("c", square_at(1.0, 0.0)),
        ];
        let overlays = classify(&route(-1.0, 2.0), &regions, OverlayPolicy::default());
        let names: Vec<&str> = overlays.iter().map(|o| o.region.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_collection_yields_empty_output() {
        let overlays = classify(&route(-1.0, 2.0), &[], OverlayPolicy::default());
        assert!(overlays.is_empty());
    }

    #[test]
    fn test_default_policy_opacity_is_constant() {
        let regions = vec![
            Region::simple("hit", square_at(0.0, 0.0)),
            Region::simple("miss", square_at(5.0, 0.0)),
        ];
        let overlays = classify(&route(-1.0, 2.0), &regions, OverlayPolicy::default());
        assert!(overlays[0].crossed);
        assert!(!overlays[1].crossed);
        assert_eq!(overlays[0].fill_opacity, DEFAULT_FILL_OPACITY);
        assert_eq!(overlays[1].fill_opacity, DEFAULT_FILL_OPACITY);
    }

    #[test]
    fn test_highlight_policy_distinguishes_crossing() {
        let regions = vec![
            Region::simple("hit", square_at(0.0, 0.0)),
            Region::simple("miss", square_at(5.0, 0.0)),
        ];
        let overlays = classify(&route(-1.0, 2.0), &regions, OverlayPolicy::highlight_default());
        assert_eq!(overlays[0].fill_opacity, DEFAULT_FILL_OPACITY);
        assert_eq!(overlays[1].fill_opacity, DEFAULT_CLEAR_OPACITY);
        assert_ne!(overlays[0].fill_opacity, overlays[1].fill_opacity);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let regions = vec![
            Region::simple("a", square_at(0.0, 0.0)),
            degenerate_region("broken"),
            Region::simple("b", square_at(5.0, 0.0)),
            Region::composite(
                "islands",
                MultiPolygon::new(vec![square_at(10.0, 0.0), square_at(1.5, 0.0)]),
            ),
        ];
        let r = route(-1.0, 2.0);
        let sequential = classify(&r, &regions, OverlayPolicy::highlight_default());
        let parallel = classify_parallel(&r, &regions, OverlayPolicy::highlight_default());
        assert_eq!(sequential, parallel);
    }
}
