//! OpenRouteService HTTP client.
//!
//! Implements [`GeoProvider`] against the public openrouteservice.org
//! API: `/geocode/search` for forward geocoding and
//! `/v2/directions/foot-walking` for walking routes. Every call is a
//! single GET with the API key in the `Authorization` header and a
//! per-request timeout baked into the client.

use std::time::Duration;

use serde::Deserialize;

use crate::provider::{Coordinates, GeoError, GeoProvider};

/// Default public API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing profile used for all duration lookups.
const WALKING_PROFILE: &str = "foot-walking";

/// Client for the OpenRouteService geocoding and directions APIs.
pub struct OpenRouteServiceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouteServiceClient {
    /// Create a client with a per-request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be constructed,
    /// which only happens with a broken TLS backend and should fail at
    /// startup.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<serde_json::Value, GeoError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .header("Authorization", &self.api_key)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // ORS signals "no route found" as a 404 on the directions API.
            return Err(GeoError::NotFound(format!("{path} returned 404")));
        }
        if !status.is_success() {
            return Err(GeoError::Unavailable(format!(
                "{path} returned HTTP {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GeoError::Unavailable(format!("Invalid JSON from {path}: {e}")))
    }
}

/// Map a reqwest transport error onto the provider taxonomy.
///
/// Timeouts and connection failures are transient; everything else at
/// this level (TLS, protocol) is also treated as an outage since the
/// request never produced a provider answer.
fn classify_transport_error(err: reqwest::Error) -> GeoError {
    if err.is_timeout() {
        GeoError::Unavailable(format!("Request timed out: {err}"))
    } else {
        GeoError::Unavailable(format!("Transport error: {err}"))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    /// `[longitude, latitude]` in provider-native order.
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
struct DirectionsFeature {
    properties: DirectionsProperties,
}

#[derive(Debug, Deserialize)]
struct DirectionsProperties {
    summary: DirectionsSummary,
}

#[derive(Debug, Deserialize)]
struct DirectionsSummary {
    /// Route duration in seconds.
    duration: f64,
}

fn parse_geocode(value: serde_json::Value, query: &str) -> Result<Coordinates, GeoError> {
    let response: GeocodeResponse = serde_json::from_value(value)
        .map_err(|e| GeoError::Unavailable(format!("Malformed geocode response: {e}")))?;
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::NotFound(format!("No coordinates found for '{query}'")))?;
    let [longitude, latitude] = feature.geometry.coordinates;
    Ok(Coordinates {
        longitude,
        latitude,
    })
}

fn parse_directions(value: serde_json::Value) -> Result<f64, GeoError> {
    let response: DirectionsResponse = serde_json::from_value(value)
        .map_err(|e| GeoError::Unavailable(format!("Malformed directions response: {e}")))?;
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::NotFound("No route found between the given points".into()))?;
    // Provider reports seconds; callers work in minutes.
    Ok(feature.properties.summary.duration / 60.0)
}

#[async_trait::async_trait]
impl GeoProvider for OpenRouteServiceClient {
    async fn resolve_coordinates(&self, query: &str) -> Result<Coordinates, GeoError> {
        let value = self
            .get_json("/geocode/search", &[("text", query), ("size", "1")])
            .await?;
        let coords = parse_geocode(value, query)?;
        tracing::debug!(query, longitude = coords.longitude, latitude = coords.latitude, "Geocoded address");
        Ok(coords)
    }

    async fn route_duration_minutes(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<f64, GeoError> {
        let start_param = format!("{},{}", start.longitude, start.latitude);
        let end_param = format!("{},{}", end.longitude, end.latitude);
        let path = format!("/v2/directions/{WALKING_PROFILE}");
        let value = self
            .get_json(&path, &[("start", start_param.as_str()), ("end", end_param.as_str())])
            .await?;
        parse_directions(value)
    }
}
