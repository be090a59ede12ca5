//! Google Geocoding API client for address capture.
//!
//! Forward geocoding resolves a typed address into coordinates during
//! address entry; reverse geocoding labels a map pin. Only the fields the
//! address flow needs are deserialized.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::ClientConfig;

/// Google Geocoding API endpoint.
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Errors that can occur when geocoding.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google returned a non-OK status code in the payload.
    #[error("Geocoding failed: {0}")]
    Api(String),

    /// No result matched the query.
    #[error("No results for: {0}")]
    NoResults(String),
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Canonical formatted address.
    pub formatted_address: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Google place id, kept for future Places lookups.
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    formatted_address: String,
    geometry: Geometry,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Client for the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    api_key: secrecy::SecretString,
}

impl Geocoder {
    /// Create a geocoder from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.maps_api_key.clone(),
        })
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let mut params = params.to_vec();
        let key = self.api_key.expose_secret().to_string();
        params.push(("key", key.as_str()));

        let response: GeocodeResponse = self
            .client
            .get(GEOCODE_URL)
            .query(&params)
            .send()
            .await?
            .json()
            .await?;

        match response.status.as_str() {
            "OK" => Ok(response
                .results
                .into_iter()
                .map(|r| GeocodeResult {
                    formatted_address: r.formatted_address,
                    latitude: r.geometry.location.lat,
                    longitude: r.geometry.location.lng,
                    place_id: r.place_id,
                })
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => Err(GeocodeError::Api(
                response
                    .error_message
                    .unwrap_or_else(|| status.to_string()),
            )),
        }
    }

    /// Resolve a free-form address to candidate locations.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NoResults`] when nothing matches.
    #[instrument(skip(self))]
    pub async fn forward(&self, address: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let results = self.query(&[("address", address)]).await?;
        if results.is_empty() {
            return Err(GeocodeError::NoResults(address.to_string()));
        }
        Ok(results)
    }

    /// Resolve coordinates to the best-matching address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NoResults`] when nothing matches.
    #[instrument(skip(self))]
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<GeocodeResult, GeocodeError> {
        let latlng = format!("{latitude},{longitude}");
        let results = self.query(&[("latlng", &latlng)]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResults(latlng))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "12 Olive St, Nicosia, Cyprus",
                "geometry": {"location": {"lat": 35.17, "lng": 33.36}},
                "place_id": "ChIJexample"
            }]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.results.len(), 1);
        let first = parsed.results.first().unwrap();
        assert!((first.geometry.location.lat - 35.17).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_results_parses_without_results_field() {
        let json = r#"{"status": "ZERO_RESULTS"}"#;
        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = GeocodeError::NoResults("atlantis".to_string());
        assert_eq!(err.to_string(), "No results for: atlantis");
    }
}
