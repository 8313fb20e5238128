use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use madrone::geocode::GeocoderConfig;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub geocoder: GeocoderConfig,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }
}
