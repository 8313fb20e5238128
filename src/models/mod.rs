//! Core data models for overlay classification and geocoding.

pub mod geometry;
pub mod place;
pub mod region;
pub mod route;

pub use geometry::{GeoBbox, GeoPoint, GeometryClass};
pub use place::Place;
pub use region::{Region, RegionGeometry};
pub use route::{Route, RouteError};
