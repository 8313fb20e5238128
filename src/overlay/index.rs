//! Spatial index for point-in-region lookups.

use geo_types::Point;
use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::info;

use crate::models::Region;

/// Wrapper for R-tree indexing of regions
#[derive(Clone)]
pub struct IndexedRegion {
    pub region: Arc<Region>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedRegion {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedRegion {
    pub fn new(region: Region) -> Option<Self> {
        let bbox = region.bbox()?;
        Some(Self {
            region: Arc::new(region),
            envelope: AABB::from_corners(
                [bbox.min_lon, bbox.min_lat],
                [bbox.max_lon, bbox.max_lat],
            ),
        })
    }
}

/// R-tree over region bounding boxes with exact containment refinement
pub struct RegionSpatialIndex {
    tree: RTree<IndexedRegion>,
}

impl RegionSpatialIndex {
    /// Build the index. Regions without a bounding box are dropped.
    pub fn build(regions: Vec<Region>) -> Self {
        let indexed: Vec<IndexedRegion> = regions
            .into_iter()
            .filter_map(IndexedRegion::new)
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Spatial index built with {} regions", tree.size());

        Self { tree }
    }

    /// First region containing the point, if any
    pub fn locate(&self, lon: f64, lat: f64) -> Option<Arc<Region>> {
        let point = Point::new(lon, lat);
        let query_envelope = AABB::from_point([lon, lat]);

        // Envelope candidates from the R-tree, then exact containment
        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .find(|ir| ir.region.contains(&point))
            .map(|ir| Arc::clone(&ir.region))
    }

    /// All regions containing the point
    pub fn locate_all(&self, lon: f64, lat: f64) -> Vec<Arc<Region>> {
        let point = Point::new(lon, lat);
        let query_envelope = AABB::from_point([lon, lat]);

        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|ir| ir.region.contains(&point))
            .map(|ir| Arc::clone(&ir.region))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Iterate over all indexed regions
    pub fn regions(&self) -> impl Iterator<Item = &Arc<Region>> {
        self.tree.iter().map(|ir| &ir.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    fn square_region(name: &str, x: f64) -> Region {
        Region::simple(
            name,
            polygon![
                (x: x, y: 0.0),
                (x: x + 1.0, y: 0.0),
                (x: x + 1.0, y: 1.0),
                (x: x, y: 1.0),
            ],
        )
    }

    #[test]
    fn test_locate_finds_containing_region() {
        let index = RegionSpatialIndex::build(vec![
            square_region("west", 0.0),
            square_region("east", 5.0),
        ]);
        assert_eq!(index.len(), 2);

        let hit = index.locate(5.5, 0.5).unwrap();
        assert_eq!(hit.name, "east");
        assert!(index.locate(3.0, 0.5).is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = RegionSpatialIndex::build(vec![]);
        assert!(index.is_empty());
        assert!(index.locate(0.0, 0.0).is_none());
    }

    #[test]
    fn test_locate_all_with_overlap() {
        // Two overlapping squares share the point (0.75, 0.5)
        let index = RegionSpatialIndex::build(vec![
            square_region("a", 0.0),
            square_region("b", 0.5),
        ]);
        let hits = index.locate_all(0.75, 0.5);
        assert_eq!(hits.len(), 2);
    }
}
