//! Route: an ordered polyline of waypoints.

use geo_types::{Coord, LineString};
use thiserror::Error;

use super::geometry::{GeoBbox, GeoPoint};

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("a route needs at least 2 waypoints, got {0}")]
    TooShort(usize),
    #[error("waypoint {0} has a non-finite coordinate")]
    NonFinite(usize),
}

/// An ordered sequence of waypoints forming a polyline.
///
/// Validated on construction: at least two waypoints, all coordinates
/// finite. Immutable afterwards; consumed for crossing tests and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<GeoPoint>,
}

impl Route {
    pub fn new(waypoints: Vec<GeoPoint>) -> Result<Self, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooShort(waypoints.len()));
        }
        if let Some(i) = waypoints.iter().position(|p| !p.is_finite()) {
            return Err(RouteError::NonFinite(i));
        }
        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// LineString view in lon/lat (x/y) order
    pub fn line_string(&self) -> LineString<f64> {
        LineString::new(self.waypoints.iter().map(|p| Coord::from(*p)).collect())
    }

    pub fn bbox(&self) -> GeoBbox {
        let first = &self.waypoints[0];
        let seed = GeoBbox::new(first.lon, first.lat, first.lon, first.lat);
        self.waypoints.iter().skip(1).fold(seed, |acc, p| {
            acc.merge(&GeoBbox::new(p.lon, p.lat, p.lon, p.lat))
        })
    }
}
