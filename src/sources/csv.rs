//! CSV loading for address records and route waypoints.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::models::{GeoPoint, Route};

/// A named address, not yet geocoded
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub name: String,
    pub address: String,
}

/// Load address records from a CSV file with `name` and `address` columns
pub fn load_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<AddressRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let records = read_addresses(file)?;
    info!(
        "Loaded {} address records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn read_addresses<R: Read>(reader: R) -> Result<Vec<AddressRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h == "name")
        .context("Column 'name' not found")?;
    let address_idx = headers
        .iter()
        .position(|h| h == "address")
        .context("Column 'address' not found")?;

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let name = record.get(name_idx).unwrap_or("").trim();
        let address = record.get(address_idx).unwrap_or("").trim();

        if name.is_empty() || address.is_empty() {
            warn!("Skipping incomplete address record: {:?}", record);
            continue;
        }

        records.push(AddressRecord {
            name: name.to_string(),
            address: address.to_string(),
        });
    }
    Ok(records)
}

/// Load a route from a CSV file with `lat` and `lon` columns
pub fn load_waypoints<P: AsRef<Path>>(path: P) -> Result<Route> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let route = read_waypoints(file)?;
    info!(
        "Loaded route with {} waypoints from {}",
        route.len(),
        path.display()
    );
    Ok(route)
}

pub fn read_waypoints<R: Read>(reader: R) -> Result<Route> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let lat_idx = headers
        .iter()
        .position(|h| h == "lat")
        .context("Column 'lat' not found")?;
    let lon_idx = headers
        .iter()
        .position(|h| h == "lon")
        .context("Column 'lon' not found")?;

    let mut waypoints = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        let lat: f64 = record
            .get(lat_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Invalid latitude in row {}", row + 1))?;
        let lon: f64 = record
            .get(lon_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Invalid longitude in row {}", row + 1))?;
        waypoints.push(GeoPoint::new(lat, lon));
    }

    Ok(Route::new(waypoints)?)
}
