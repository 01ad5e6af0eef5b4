//! The [`GeoProvider`] trait and its error taxonomy.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
///
/// Field order follows the provider's native `[longitude, latitude]`
/// convention to keep conversions mechanical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// Errors from a geocoding/routing provider.
///
/// The two variants demand different handling and must never be
/// collapsed: `NotFound` is a definitive answer ("there is no route")
/// and retrying it is pointless; `Unavailable` is transient (timeout,
/// connection failure, 5xx) and may be retried with backoff.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The provider returned zero results for the query.
    #[error("No result from geo provider: {0}")]
    NotFound(String),

    /// The provider could not be reached or failed internally.
    #[error("Geo provider unavailable: {0}")]
    Unavailable(String),
}

impl GeoError {
    /// Whether a retry could plausibly produce a different outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GeoError::Unavailable(_))
    }
}

/// External geocoding/routing service.
///
/// Implementations perform one network call per invocation; there is
/// no caching or batching at this layer. Injected as a trait object so
/// tests can substitute deterministic doubles.
#[async_trait::async_trait]
pub trait GeoProvider: Send + Sync {
    /// Resolve a free-text address to a coordinate pair.
    ///
    /// Returns [`GeoError::NotFound`] when the provider has no match
    /// for the query.
    async fn resolve_coordinates(&self, query: &str) -> Result<Coordinates, GeoError>;

    /// Walking duration in minutes between two coordinate pairs.
    ///
    /// Returns [`GeoError::NotFound`] when no route exists between the
    /// points (e.g. endpoints on different land masses).
    async fn route_duration_minutes(
        &self,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<f64, GeoError>;
}
