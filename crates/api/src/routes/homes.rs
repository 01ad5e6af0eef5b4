//! Route definitions for the `/homes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::homes;
use crate::state::AppState;

/// Routes mounted at `/homes`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete (admin only)
/// GET    /{id}/distances   -> distances
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(homes::list).post(homes::create))
        .route(
            "/{id}",
            get(homes::get_by_id)
                .put(homes::update)
                .delete(homes::delete),
        )
        .route("/{id}/distances", get(homes::distances))
}
