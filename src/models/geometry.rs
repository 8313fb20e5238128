//! Basic geographic types and the point/curve/surface taxonomy.

use geo_types::Geometry;
use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite real numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<GeoPoint> for geo_types::Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::Coord { x: p.lon, y: p.lat }
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::Point::new(p.lon, p.lat)
    }
}

/// Axis-aligned bounding box in lon/lat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBbox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBbox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn from_rect(rect: geo_types::Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Grow this box to cover another one
    pub fn merge(&self, other: &GeoBbox) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

/// Topological class of a geometry.
///
/// Every geometry splits the plane into three mutually exclusive point
/// sets: interior, boundary, and exterior. The class determines the
/// dimension of the first two: a point has a single interior point and an
/// empty boundary, a curve has a 1-dimensional interior bounded by its
/// endpoints, and a surface has a 2-dimensional interior bounded by its
/// rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryClass {
    Point,
    Curve,
    Surface,
}

impl GeometryClass {
    /// Classify a geometry, or `None` for heterogeneous collections
    pub fn of(geometry: &Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(GeometryClass::Point),
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                Some(GeometryClass::Curve)
            }
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => Some(GeometryClass::Surface),
            Geometry::GeometryCollection(_) => None,
        }
    }

    /// Dimension of the interior set
    pub fn interior_dimension(&self) -> usize {
        match self {
            GeometryClass::Point => 0,
            GeometryClass::Curve => 1,
            GeometryClass::Surface => 2,
        }
    }

    /// Dimension of the boundary set, `None` when the boundary is empty
    pub fn boundary_dimension(&self) -> Option<usize> {
        match self {
            GeometryClass::Point => None,
            GeometryClass::Curve => Some(0),
            GeometryClass::Surface => Some(1),
        }
    }
}
