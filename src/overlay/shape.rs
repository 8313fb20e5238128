//! Renderable region outlines with an explicit fallible constructor.

use geo::Area;
use geo_types::LineString;
use thiserror::Error;

use crate::models::Region;

/// Why a region could not be turned into a renderable shape
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("region has no polygon parts")]
    Empty,
    #[error("part {part} has {len} exterior coordinates, need at least 4")]
    RingTooShort { part: usize, len: usize },
    #[error("part {0} has a non-finite coordinate")]
    NonFinite(usize),
    #[error("part {0} has zero area")]
    ZeroArea(usize),
}

/// Exterior rings of a region, validated for drawing.
///
/// Construction fails on degenerate geometry instead of producing a shape
/// that a renderer would reject; callers skip the region and move on.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderShape {
    rings: Vec<LineString<f64>>,
}

impl RenderShape {
    pub fn build(region: &Region) -> Result<Self, ShapeError> {
        let parts = region.parts();
        if parts.is_empty() {
            return Err(ShapeError::Empty);
        }

        let mut rings = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let exterior = part.exterior();
            if exterior.0.len() < 4 {
                return Err(ShapeError::RingTooShort {
                    part: i,
                    len: exterior.0.len(),
                });
            }
            if exterior.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
                return Err(ShapeError::NonFinite(i));
            }
            if part.unsigned_area() == 0.0 {
                return Err(ShapeError::ZeroArea(i));
            }
            rings.push(exterior.clone());
        }

        Ok(Self { rings })
    }

    /// One closed exterior ring per region part, in part order
    pub fn rings(&self) -> &[LineString<f64>] {
        &self.rings
    }
}
