//! Overlay classification of regions against a route.
//!
//! Pairs each region with a renderable shape and a fill opacity derived
//! from whether the route crosses it, plus an R-tree index for
//! point-in-region lookups.

mod classifier;
mod index;
mod shape;

pub use classifier::{
    classify, classify_parallel, OverlayPolicy, RegionOverlay, DEFAULT_CLEAR_OPACITY,
    DEFAULT_FILL_OPACITY,
};
pub use index::RegionSpatialIndex;
pub use shape::{RenderShape, ShapeError};
