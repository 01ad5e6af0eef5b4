//! Route definitions for the `/users` resource (admin only).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /       -> list (admin only)
/// DELETE /{id}   -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}", delete(users::delete))
}
