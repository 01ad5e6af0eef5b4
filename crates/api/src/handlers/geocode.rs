//! Free-text geocoding lookup, used by clients to preview an address
//! before submitting an entity.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use nearby_geo::retry::with_retry;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeSearch {
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResult {
    pub longitude: f64,
    pub latitude: f64,
}

/// POST /api/v1/geocode/search (requires auth)
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<GeocodeSearch>,
) -> AppResult<Json<GeocodeResult>> {
    let coords = with_retry(&state.config.geo.retry, || {
        state.geo.resolve_coordinates(&input.search_term)
    })
    .await?;

    Ok(Json(GeocodeResult {
        longitude: coords.longitude,
        latitude: coords.latitude,
    }))
}
