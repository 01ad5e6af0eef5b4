pub mod auth;
pub mod geocode;
pub mod health;
pub mod homes;
pub mod locations;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup              register account (public)
/// /auth/signin              obtain access token (public)
///
/// /users                    list users (admin only)
/// /users/{id}               delete user (admin only)
///
/// /homes                    list, create
/// /homes/{id}               get, update, delete (delete admin only)
/// /homes/{id}/distances     walking distances for one home
///
/// /locations                list, create
/// /locations/{id}           get, update, delete (delete admin only)
///
/// /geocode/search           resolve free-text address to coordinates
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, signin).
        .nest("/auth", auth::router())
        // User administration.
        .nest("/users", users::router())
        // Homes and their distance rows.
        .nest("/homes", homes::router())
        // Points of interest.
        .nest("/locations", locations::router())
        // Direct geocoding lookups.
        .nest("/geocode", geocode::router())
}
