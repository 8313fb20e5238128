//! Address geocoding via a Nominatim-style search endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::models::GeoPoint;

/// Geocoder connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Pause after each network lookup, in milliseconds
    pub delay_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "madrone/0.1 (overlay mapping toolkit)".to_string(),
            timeout_secs: 30,
            delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Resolves postal addresses to coordinates.
pub struct Geocoder {
    client: Client,
    endpoint: Url,
    delay: Duration,
    /// Cache of address → resolved location; misses are cached too
    cache: HashMap<String, Option<GeoPoint>>,
}

impl Geocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).context("Invalid geocoder endpoint")?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            delay: Duration::from_millis(config.delay_ms),
            cache: HashMap::new(),
        })
    }

    /// Resolve an address to coordinates.
    ///
    /// An address the service cannot resolve is `Ok(None)`, not an error.
    /// Failed requests are retried once before giving up.
    pub async fn geocode(&mut self, address: &str) -> Result<Option<GeoPoint>> {
        if let Some(cached) = self.cache.get(address) {
            return Ok(*cached);
        }

        let resolved = self.lookup(address).await?;
        self.cache.insert(address.to_string(), resolved);

        // Small delay to be nice to the geocoding service
        tokio::time::sleep(self.delay).await;

        Ok(resolved)
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    async fn lookup(&self, address: &str) -> Result<Option<GeoPoint>> {
        let mut attempts = 0;
        let max_attempts = 2;

        loop {
            attempts += 1;

            let response = match self
                .client
                .get(self.endpoint.clone())
                .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    warn!(
                        "Geocoding request failed (attempt {}/{}): {}",
                        attempts, max_attempts, e
                    );
                    if attempts < max_attempts {
                        tokio::time::sleep(Duration::from_secs(2)).await;
                        continue;
                    }
                    return Err(e).context("Geocoding request failed");
                }
            };

            let hits: Vec<SearchHit> = response
                .error_for_status()
                .context("Geocoder returned an error status")?
                .json()
                .await
                .context("Failed to parse geocoder response")?;

            return Ok(match hits.first() {
                Some(hit) => parse_hit(hit),
                None => {
                    debug!("No geocoding result for {:?}", address);
                    None
                }
            });
        }
    }
}

fn parse_hit(hit: &SearchHit) -> Option<GeoPoint> {
    let lat: f64 = hit.lat.parse().ok()?;
    let lon: f64 = hit.lon.parse().ok()?;
    let point = GeoPoint::new(lat, lon);
    point.is_finite().then_some(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        // Coordinates come back as strings; extra fields are ignored
        let body = r#"[{"place_id":1,"lat":"52.52","lon":"13.405","display_name":"Berlin"}]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(body).unwrap();
        assert_eq!(parse_hit(&hits[0]), Some(GeoPoint::new(52.52, 13.405)));
    }

    #[test]
    fn test_unparsable_hit_is_none() {
        let hit = SearchHit {
            lat: "not-a-number".to_string(),
            lon: "13.4".to_string(),
        };
        assert_eq!(parse_hit(&hit), None);
    }

    #[test]
    fn test_default_config_is_usable() {
        let config = GeocoderConfig::default();
        let geocoder = Geocoder::new(&config).unwrap();
        assert_eq!(geocoder.cached(), 0);
    }
}
