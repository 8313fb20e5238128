//! File loading for regions, routes, and address records.

pub mod csv;
pub mod geojson;

pub use self::csv::AddressRecord;
