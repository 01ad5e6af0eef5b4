use std::sync::Arc;

use nearby_geo::GeoProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: nearby_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Geocoding/routing provider. A trait object so tests can swap in
    /// a deterministic double.
    pub geo: Arc<dyn GeoProvider>,
}
