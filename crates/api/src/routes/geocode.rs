//! Route definitions for the `/geocode` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::geocode;
use crate::state::AppState;

/// Routes mounted at `/geocode`.
///
/// ```text
/// POST /search  -> search (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(geocode::search))
}
