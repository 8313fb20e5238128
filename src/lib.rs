//! Madrone - overlay classification and map styling for geographic data.
//!
//! This library provides shared types and modules for the classify and
//! places binaries: region/route models, the route-crossing overlay
//! classifier, a point-in-region spatial index, address geocoding, and
//! styled GeoJSON output.

pub mod geocode;
pub mod models;
pub mod overlay;
pub mod render;
pub mod sources;

pub use models::{GeoBbox, GeoPoint, GeometryClass, Place, Region, RegionGeometry, Route};
pub use overlay::{classify, OverlayPolicy, RegionOverlay};
