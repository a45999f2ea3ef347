//! IP geolocation lookup client

use crate::Result;
use serde::Deserialize;
use tracing::{debug, instrument};

const DEFAULT_GEO_URL: &str = "http://api.db-ip.com";

/// Coordinates for an IP address; either may be missing even on a
/// successful lookup
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Geolocation collaborator. Lookups may fail (network, quota); the
/// builder catches the failure and omits coordinates from the record.
#[allow(async_fn_in_trait)]
pub trait GeoLookup {
    async fn lookup(&self, ip: &str) -> Result<GeoPoint>;
}

/// Client for a db-ip style free geolocation API
#[derive(Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client configured from `GEO_API_URL`, defaulting to the public
    /// free endpoint
    pub fn default_local() -> Self {
        let url = std::env::var("GEO_API_URL").unwrap_or_else(|_| DEFAULT_GEO_URL.to_string());
        Self::new(url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl GeoLookup for GeoClient {
    #[instrument(skip(self))]
    async fn lookup(&self, ip: &str) -> Result<GeoPoint> {
        let url = format!("{}/v2/free/{}", self.base_url, ip);
        let point: GeoPoint = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            "Geolocation for {}: lat={:?} lon={:?}",
            ip, point.latitude, point.longitude
        );
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_tolerates_missing_coordinates() {
        let point: GeoPoint = serde_json::from_str(r#"{"latitude": 43.65}"#).unwrap();
        assert_eq!(point.latitude, Some(43.65));
        assert!(point.longitude.is_none());
    }

    #[test]
    fn test_default_base_url() {
        std::env::remove_var("GEO_API_URL");
        let client = GeoClient::default_local();
        assert_eq!(client.base_url(), "http://api.db-ip.com");
    }
}
