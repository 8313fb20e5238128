//! Forward geocoding of postal addresses.

mod client;

pub use client::{Geocoder, GeocoderConfig};
