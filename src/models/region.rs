//! Named map regions backed by one or more polygons.

use geo::{BoundingRect, Contains};
use geo_types::{MultiPolygon, Point, Polygon};

use super::geometry::GeoBbox;

/// Geometry of a region.
///
/// A region is either one simple polygon or an ordered sequence of
/// polygon parts (a mainland with islands). Both variants expose the same
/// `parts()` slice, so callers iterate constituents without branching on
/// the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Simple(Polygon<f64>),
    Composite(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Constituent simple polygons, in order
    pub fn parts(&self) -> &[Polygon<f64>] {
        match self {
            RegionGeometry::Simple(polygon) => std::slice::from_ref(polygon),
            RegionGeometry::Composite(multi) => &multi.0,
        }
    }
}

/// A named region with polygon geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub geometry: RegionGeometry,
}

impl Region {
    pub fn simple(name: impl Into<String>, polygon: Polygon<f64>) -> Self {
        Self {
            name: name.into(),
            geometry: RegionGeometry::Simple(polygon),
        }
    }

    pub fn composite(name: impl Into<String>, multi: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            geometry: RegionGeometry::Composite(multi),
        }
    }

    /// Constituent simple polygons, in order
    pub fn parts(&self) -> &[Polygon<f64>] {
        self.geometry.parts()
    }

    /// Bounding box over all parts
    pub fn bbox(&self) -> Option<GeoBbox> {
        self.parts()
            .iter()
            .filter_map(|p| p.bounding_rect())
            .map(GeoBbox::from_rect)
            .reduce(|acc, b| acc.merge(&b))
    }

    /// Whether any part contains the point (lon/lat)
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.parts().iter().any(|p| p.contains(point))
    }
}
