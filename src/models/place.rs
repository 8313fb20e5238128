//! Geocoded place records.

use serde::{Deserialize, Serialize};

use super::geometry::GeoPoint;

/// A place resolved from a postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,

    /// The address string that was geocoded
    pub address: String,

    /// Resolved location
    pub location: GeoPoint,

    /// Name of the region containing the location, if any was matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Place {
    pub fn new(name: impl Into<String>, address: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            location,
            region: None,
        }
    }
}
